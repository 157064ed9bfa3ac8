use crate::framework::{
    BasicData, Entity, EntityError, FieldMap, Many, MultiAssociation, One, Params, Relations, Schema,
};
use crate::model::{Board, Card};
use once_cell::sync::Lazy;

static SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::builder("List")
        .attributes(["name", "closed", "pos", "board_id"])
        .one("board", One::new().using("board_id"))
        .many("cards", Many::new())
        .build()
});

/// A column of cards on a board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct List {
    data: BasicData,
}

impl List {
    pub fn pos(&self) -> Option<f64> {
        self.get_f64("pos")
    }

    pub fn board(&self) -> Result<Board, EntityError> {
        self.one("board")
    }

    pub fn cards(&self, params: &Params) -> Result<MultiAssociation<Card>, EntityError> {
        self.many("cards", params)
    }
}

impl Entity for List {
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
