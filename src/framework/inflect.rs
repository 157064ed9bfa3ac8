//! Name inflection used to derive resource paths and registry keys.
//!
//! - [`underscore`]: `CustomField` -> `custom_field` (resource path names)
//! - [`camelize`]: `custom_field` -> `CustomField` (canonical type names)
//! - [`pluralize`] / [`singularize`]: English plural forms for path segments

use convert_case::{Case, Casing};

const UNCOUNTABLE: &[&str] = &["equipment", "information", "series", "species", "news"];

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
];

pub fn underscore(name: &str) -> String {
    name.to_case(Case::Snake)
}

pub fn camelize(name: &str) -> String {
    name.to_case(Case::Pascal)
}

/// Plural form of a lower-case word. Already-plural words are returned unchanged.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(s, p)| *s == word || *p == word) {
        return plural.to_string();
    }
    if word.ends_with("ies") || (word.ends_with('s') && !is_sibilant(word)) {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix('y') {
        if !stem.ends_with(is_vowel) {
            return format!("{stem}ies");
        }
    }
    if is_sibilant(word) {
        return format!("{word}es");
    }
    format!("{word}s")
}

/// Singular form of a lower-case word. Already-singular words are returned unchanged.
pub fn singularize(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((singular, _)) = IRREGULAR.iter().find(|(s, p)| *p == word || *s == word) {
        return singular.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }
    for suffix in ["sses", "ches", "shes", "xes", "zes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    match word.strip_suffix('s') {
        Some(stem) if !stem.ends_with('s') && !stem.is_empty() => stem.to_string(),
        _ => word.to_string(),
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_sibilant(word: &str) -> bool {
    ["ss", "sh", "ch", "x", "z"].iter().any(|s| word.ends_with(s))
}
