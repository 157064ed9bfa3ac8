use crate::framework::{
    BasicData, Entity, EntityError, FieldMap, Many, MultiAssociation, One, Params, Relations, Schema,
};
use crate::model::{Card, List, Member, Organization};
use once_cell::sync::Lazy;

static SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::builder("Board")
        .attributes(["name", "desc", "closed", "starred", "organization_id"])
        .readonly(["url"])
        .one("organization", One::new().using("organization_id"))
        .many("cards", Many::new())
        .many("lists", Many::new())
        .many("open_cards", Many::new().via("Card").path("cards").param("filter", "open"))
        .many("members", Many::new())
        .build()
});

/// A board: the top-level container of lists and cards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    data: BasicData,
}

impl Board {
    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    pub fn is_closed(&self) -> bool {
        self.get_bool("closed").unwrap_or(false)
    }

    pub fn organization(&self) -> Result<Organization, EntityError> {
        self.one("organization")
    }

    pub fn cards(&self, params: &Params) -> Result<MultiAssociation<Card>, EntityError> {
        self.many("cards", params)
    }

    pub fn lists(&self, params: &Params) -> Result<MultiAssociation<List>, EntityError> {
        self.many("lists", params)
    }

    pub fn members(&self, params: &Params) -> Result<MultiAssociation<Member>, EntityError> {
        self.many("members", params)
    }
}

impl Entity for Board {
    fn schema() -> &'static Schema {
        &SCHEMA
    }

    fn from_data(data: BasicData) -> Self {
        Self { data }
    }

    fn data(&self) -> &BasicData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut BasicData {
        &mut self.data
    }

    fn update_fields(&mut self, fields: &FieldMap) -> Result<(), EntityError> {
        self.data.attributes_mut().populate_from(fields);
        Ok(())
    }
}
