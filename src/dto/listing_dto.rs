use crate::service::query_builder::{FilterOptions, ListingRequest, SortDirection, SortOptions};
use serde::{Deserialize, Serialize};

/// Listing options as they arrive in the query string. Omitted paging means
/// the whole table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingParams {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
    pub filter_column: Option<String>,
    pub filter_pattern: Option<String>,
    pub sort_direction: Option<SortDirection>,
    /// Comma separated.
    pub sort_columns: Option<String>,
}

impl From<ListingParams> for ListingRequest {
    fn from(params: ListingParams) -> Self {
        ListingRequest {
            page_number: params.page_number.unwrap_or(-1),
            page_size: params.page_size.unwrap_or(-1),
            filter: FilterOptions {
                column: params.filter_column.unwrap_or_default(),
                pattern: params.filter_pattern.unwrap_or_default(),
            },
            sort: SortOptions {
                direction: params.sort_direction.unwrap_or_default(),
                columns: params
                    .sort_columns
                    .map(|columns| columns.split(',').map(str::to_string).collect())
                    .unwrap_or_default(),
            },
        }
    }
}
