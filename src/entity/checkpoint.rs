use crate::entity::record::{ColumnValue, Record};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, sqlx::FromRow)]
pub struct Checkpoint {
    pub id: i64,
    pub phone_number: String,
}

impl Record for Checkpoint {
    const TABLE: &'static str = "checkpoints";
    const COLUMNS: &'static [&'static str] = &["id", "phone_number"];

    fn id(&self) -> i64 {
        self.id
    }

    fn column(&self, name: &str) -> ColumnValue {
        match name {
            "id" => self.id.into(),
            "phone_number" => self.phone_number.as_str().into(),
            _ => ColumnValue::Null,
        }
    }
}
