use crate::framework::{
    BasicData, Entity, EntityError, FieldMap, Many, MultiAssociation, One, Params, Relations, Schema,
};
use crate::model::{Board, List, Member};
use once_cell::sync::Lazy;

static SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::builder("Card")
        .attributes(["name", "desc", "closed", "due", "pos", "board_id", "list_id", "member_ids"])
        .readonly(["url", "short_id"])
        .one("board", One::new().using("board_id"))
        .one("list", One::new().using("list_id").path("lists"))
        .many("members", Many::new())
        .build()
});

/// A card on a list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Card {
    data: BasicData,
}

impl Card {
    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    /// The board-scoped sequence number shown in card links.
    pub fn short_id(&self) -> Option<i64> {
        self.get_i64("short_id")
    }

    pub fn pos(&self) -> Option<f64> {
        self.get_f64("pos")
    }

    pub fn board(&self) -> Result<Board, EntityError> {
        self.one("board")
    }

    pub fn list(&self) -> Result<List, EntityError> {
        self.one("list")
    }

    pub fn members(&self, params: &Params) -> Result<MultiAssociation<Member>, EntityError> {
        self.many("members", params)
    }

    /// Move the card to another list. Takes effect on the next `persist`.
    pub fn move_to_list(&mut self, list: &List) -> Result<bool, EntityError> {
        let list_id = list.id().clone();
        self.set("list_id", list_id)
    }
}

impl Entity for Card {
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
