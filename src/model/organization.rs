use crate::framework::{
    BasicData, Entity, EntityError, FieldMap, Many, MultiAssociation, Params, Relations, Schema,
};
use crate::model::{Board, Member};
use once_cell::sync::Lazy;

static SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::builder("Organization")
        .attributes(["name", "display_name", "desc", "website"])
        .readonly(["url"])
        .many("boards", Many::new())
        .many("members", Many::new())
        .build()
});

/// A team that owns boards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Organization {
    data: BasicData,
}

impl Organization {
    pub fn boards(&self, params: &Params) -> Result<MultiAssociation<Board>, EntityError> {
        self.many("boards", params)
    }

    pub fn members(&self, params: &Params) -> Result<MultiAssociation<Member>, EntityError> {
        self.many("members", params)
    }
}

impl Entity for Organization {
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
