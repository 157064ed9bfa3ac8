//! End-to-end flows against the in-memory client.

use entity_recipe::clients::InMemoryClient;
use entity_recipe::framework::mock::fields;
use entity_recipe::framework::{Entity, EntityError, Gateway, Params, Relations, RemoteClient, Session};
use entity_recipe::lifecycle::build_session;
use entity_recipe::model::{Board, Card, List, Member};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn seeded() -> (Arc<InMemoryClient>, Session) {
    let store = Arc::new(InMemoryClient::new());
    store.insert("organization", fields(json!({ "id": "o1", "name": "acme", "display_name": "Acme" })));
    store.insert("board", fields(json!({ "id": "b1", "name": "Roadmap", "organization_id": "o1", "member_ids": ["m1"] })));
    store.insert("list", fields(json!({ "id": "l1", "name": "Todo", "board_id": "b1" })));
    store.insert("list", fields(json!({ "id": "l2", "name": "Done", "board_id": "b1" })));
    store.insert(
        "card",
        fields(json!({ "id": "c1", "name": "Write docs", "board_id": "b1", "list_id": "l1", "closed": false })),
    );
    store.insert(
        "card",
        fields(json!({ "id": "c2", "name": "Old idea", "board_id": "b1", "list_id": "l1", "closed": true })),
    );
    store.insert(
        "member",
        fields(json!({ "id": "m1", "username": "ada", "fullName": "Ada Lovelace", "board_ids": ["b1"] })),
    );
    let session = build_session(store.clone());
    (store, session)
}

#[test]
fn test_walk_board_relationships() {
    let (_, session) = seeded();
    let board = Board::find(&session, "b1", &Params::new()).unwrap();

    assert_eq!(board.organization().unwrap().get_str("display_name"), Some("Acme"));

    let lists = board.lists(&Params::new()).unwrap();
    let names: Vec<_> = lists.iter().map(|l| l.get_str("name")).collect();
    assert_eq!(names, vec![Some("Todo"), Some("Done")]);

    let todo = &lists[0];
    assert_eq!(todo.cards(&Params::new()).unwrap().len(), 2);
    assert_eq!(todo.board().unwrap(), board);

    let open = board.many::<Card>("open_cards", &Params::new()).unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].name(), Some("Write docs"));

    let members: Vec<Member> = board.members(&Params::new()).unwrap().into_vec();
    assert_eq!(members[0].get_str("full_name"), Some("Ada Lovelace"));
    assert_eq!(members[0].boards(&Params::new()).unwrap()[0], board);
}

#[test]
fn test_edit_and_persist_sends_only_changes() {
    let (store, session) = seeded();
    let mut card = Card::find(&session, "c1", &Params::new()).unwrap();
    let done = List::find(&session, "l2", &Params::new()).unwrap();

    assert!(card.move_to_list(&done).unwrap());
    assert_eq!(card.attributes().changed(), vec!["list_id"]);
    card.persist().unwrap();
    assert!(!card.attributes().has_changes());

    let stored = store.find("card", &json!("c1"), &Params::new()).unwrap();
    assert_eq!(stored["list_id"], json!("l2"));
    assert_eq!(card.list().unwrap(), done);

    // refreshed copy sees the server state, the original is untouched
    assert_eq!(card.refresh().unwrap().get_str("list_id"), Some("l2"));
}

#[test]
fn test_save_creates_and_adopts_server_id() {
    let (store, session) = seeded();
    let card = Card::save_with(
        &session,
        &fields(json!({ "name": "New", "board_id": "b1" })),
        |card| {
            card.set("list_id", "l2").unwrap();
        },
    )
    .unwrap();

    assert_eq!(card.id(), &json!("card_1"));
    assert!(!card.attributes().has_changes());
    assert_eq!(store.len("card"), 3);

    let board = card.board().unwrap();
    assert_eq!(board.cards(&Params::new()).unwrap().len(), 3);
}

#[test]
fn test_missing_resource_is_client_not_found() {
    let (_, session) = seeded();
    let err = Board::find(&session, "nope", &Params::new()).unwrap_err();
    assert!(matches!(err, EntityError::Client(_)));
    assert_eq!(err.to_string(), "Resource not found: board/nope");
}

#[test]
fn test_parse_many_builds_instances_without_requests() {
    let (store, session) = seeded();
    let cards = Card::parse_many(&session, r#"[{"id":"x1","name":"a"},{"id":"x2","name":"b"}]"#).unwrap();

    assert_eq!(cards.len(), 2);
    assert_eq!(cards[1].name(), Some("b"));
    assert_eq!(store.len("card"), 2);
}
