use crate::entity::record::{ColumnValue, Record};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, sqlx::FromRow)]
pub struct Document {
    pub id: i64,
    pub serial_number: String,
    pub info_card_id: i64,
    pub document_type: String,
}

impl Record for Document {
    const TABLE: &'static str = "documents";
    const COLUMNS: &'static [&'static str] = &["id", "serial_number", "info_card_id", "document_type"];

    fn id(&self) -> i64 {
        self.id
    }

    fn column(&self, name: &str) -> ColumnValue {
        match name {
            "id" => self.id.into(),
            "serial_number" => self.serial_number.as_str().into(),
            "info_card_id" => self.info_card_id.into(),
            "document_type" => self.document_type.as_str().into(),
            _ => ColumnValue::Null,
        }
    }
}
