use crate::entity::record::{ColumnValue, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, sqlx::FromRow)]
pub struct InfoCard {
    pub id: i64,
    pub created_employee_id: i64,
    pub is_confirmed: bool,
    pub created_date: DateTime<Utc>,
}

impl Record for InfoCard {
    const TABLE: &'static str = "info_cards";
    const COLUMNS: &'static [&'static str] = &["id", "created_employee_id", "is_confirmed", "created_date"];

    fn id(&self) -> i64 {
        self.id
    }

    fn column(&self, name: &str) -> ColumnValue {
        match name {
            "id" => self.id.into(),
            "created_employee_id" => self.created_employee_id.into(),
            "is_confirmed" => self.is_confirmed.into(),
            "created_date" => self.created_date.into(),
            _ => ColumnValue::Null,
        }
    }
}
