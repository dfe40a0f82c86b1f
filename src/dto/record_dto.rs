use crate::entity::company::NewCompany;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct CompanyCreateDto {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,
    #[validate(length(max = 100, message = "City must not exceed 100 characters"))]
    pub city: Option<String>,
}

impl From<CompanyCreateDto> for NewCompany {
    fn from(dto: CompanyCreateDto) -> Self {
        NewCompany {
            name: dto.name,
            city: dto.city,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeletedDto {
    pub identity: String,
}
