use crate::entity::record::{ColumnValue, Record};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, sqlx::FromRow)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NewCompany {
    pub name: String,
    pub city: Option<String>,
}

impl Record for Company {
    const TABLE: &'static str = "companies";
    const COLUMNS: &'static [&'static str] = &["id", "name", "city"];

    fn id(&self) -> i64 {
        self.id
    }

    fn column(&self, name: &str) -> ColumnValue {
        match name {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "city" => self.city.as_deref().into(),
            _ => ColumnValue::Null,
        }
    }
}
