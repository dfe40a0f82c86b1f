use crate::entity::credential::Credential;
use crate::entity::record::{ColumnValue, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Public view of a registered credential. Employees and credentials share a
/// table; the password and refresh digests never leave through this type.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub identity: String,
    pub full_name: Option<String>,
    pub company_id: Option<i64>,
    pub post: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

impl From<&Credential> for Employee {
    fn from(credential: &Credential) -> Self {
        Self {
            id: credential.id,
            identity: credential.identity.clone(),
            full_name: credential.full_name.clone(),
            company_id: credential.company_id,
            post: credential.post.clone(),
            date_of_birth: credential.date_of_birth,
        }
    }
}

impl Record for Employee {
    const TABLE: &'static str = "employees";
    const COLUMNS: &'static [&'static str] =
        &["id", "identity", "full_name", "company_id", "post", "date_of_birth"];

    fn id(&self) -> i64 {
        self.id
    }

    fn column(&self, name: &str) -> ColumnValue {
        match name {
            "id" => self.id.into(),
            "identity" => self.identity.as_str().into(),
            "full_name" => self.full_name.as_deref().into(),
            "company_id" => self.company_id.into(),
            "post" => self.post.as_deref().into(),
            "date_of_birth" => self.date_of_birth.into(),
            _ => ColumnValue::Null,
        }
    }
}
