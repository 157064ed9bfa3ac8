use crate::framework::{
    BasicData, Entity, EntityError, FieldMap, Many, MultiAssociation, Params, Relations, Schema,
};
use crate::model::{Board, Card};
use once_cell::sync::Lazy;

static SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::builder("Member")
        .attributes(["full_name", "bio", "avatar_id"])
        .readonly(["username", "url"])
        .many("boards", Many::new())
        .many("cards", Many::new())
        .build()
});

/// A user account.
///
/// Servers send `fullName`; it is accepted as an alias of `full_name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Member {
    data: BasicData,
}

impl Member {
    pub fn username(&self) -> Option<&str> {
        self.get_str("username")
    }

    pub fn boards(&self, params: &Params) -> Result<MultiAssociation<Board>, EntityError> {
        self.many("boards", params)
    }

    pub fn cards(&self, params: &Params) -> Result<MultiAssociation<Card>, EntityError> {
        self.many("cards", params)
    }
}

impl Entity for Member {
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
        let attributes = self.data.attributes_mut();
        attributes.populate_from(fields);
        if let Some(full_name) = fields.get("fullName") {
            attributes.populate("full_name", full_name.clone())?;
        }
        Ok(())
    }
}
