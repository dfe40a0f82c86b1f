use crate::entity::record::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "ASC")]
    Asc,
    #[serde(alias = "DESC")]
    Desc,
}

impl SortDirection {
    fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub column: String,
    pub pattern: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortOptions {
    pub direction: SortDirection,
    pub columns: Vec<String>,
}

/// Caller-supplied listing options, not yet checked against any record type.
/// Pages are numbered from 0; a negative number or size means "no paging".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingRequest {
    pub page_number: i64,
    pub page_size: i64,
    pub filter: FilterOptions,
    pub sort: SortOptions,
}

impl Default for ListingRequest {
    fn default() -> Self {
        Self {
            page_number: -1,
            page_size: -1,
            filter: FilterOptions::default(),
            sort: SortOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingFilter {
    pub column: &'static str,
    pub pattern: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingSort {
    pub direction: SortDirection,
    pub columns: Vec<&'static str>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ListingPage {
    pub limit: i64,
    pub offset: i64,
}

/// A listing query whose column names have all been resolved against a
/// record's allow-list. Only `&'static str` names from that list are kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingQuery {
    pub table: &'static str,
    pub columns: &'static [&'static str],
    pub filter: Option<ListingFilter>,
    pub sort: Option<ListingSort>,
    pub page: Option<ListingPage>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SqlBind {
    Text(String),
    Int(i64),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SqlStatement {
    pub sql: String,
    pub binds: Vec<SqlBind>,
}

fn allowed_column<R: Record>(name: &str) -> Option<&'static str> {
    R::COLUMNS.iter().copied().find(|column| *column == name)
}

/// Builds the listing query for `R`.
///
/// Unknown filter columns drop the filter. A sort naming any unknown column is
/// dropped whole, so a partially applied ordering never happens.
pub fn build<R: Record>(request: &ListingRequest) -> ListingQuery {
    let filter = if request.filter.pattern.is_empty() {
        None
    } else {
        allowed_column::<R>(request.filter.column.trim()).map(|column| ListingFilter {
            column,
            pattern: request.filter.pattern.clone(),
        })
    };

    let requested: Vec<&str> = request
        .sort
        .columns
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    let resolved: Option<Vec<&'static str>> = requested.iter().map(|c| allowed_column::<R>(c)).collect();
    let sort = match resolved {
        Some(columns) if !columns.is_empty() => Some(ListingSort {
            direction: request.sort.direction,
            columns,
        }),
        _ => None,
    };

    let page = if request.page_number < 0 || request.page_size < 0 {
        None
    } else {
        Some(ListingPage {
            limit: request.page_size,
            offset: request.page_number.saturating_mul(request.page_size),
        })
    };

    ListingQuery {
        table: R::TABLE,
        columns: R::COLUMNS,
        filter,
        sort,
        page,
    }
}

/// Escapes LIKE metacharacters so the pattern matches literally.
pub fn escape_like(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl ListingQuery {
    pub fn is_unbounded(&self) -> bool {
        self.filter.is_none() && self.page.is_none()
    }

    /// Renders parameterised SQL. Without an explicit sort, rows come back in
    /// `id` order so pages stay stable.
    pub fn to_sql(&self) -> SqlStatement {
        let mut sql = format!("SELECT {} FROM {}", self.columns.join(", "), self.table);
        let mut binds = Vec::new();

        if let Some(filter) = &self.filter {
            binds.push(SqlBind::Text(format!("%{}%", escape_like(&filter.pattern))));
            sql.push_str(&format!(" WHERE {}::text LIKE ${} ESCAPE '\\'", filter.column, binds.len()));
        }

        match &self.sort {
            Some(sort) => {
                let order: Vec<String> = sort
                    .columns
                    .iter()
                    .map(|column| format!("{} {}", column, sort.direction.as_sql()))
                    .collect();
                sql.push_str(&format!(" ORDER BY {}", order.join(", ")));
            }
            None => sql.push_str(" ORDER BY id ASC"),
        }

        if let Some(page) = &self.page {
            binds.push(SqlBind::Int(page.limit));
            sql.push_str(&format!(" LIMIT ${}", binds.len()));
            binds.push(SqlBind::Int(page.offset));
            sql.push_str(&format!(" OFFSET ${}", binds.len()));
        }

        SqlStatement { sql, binds }
    }

    /// Evaluates the query over rows already in memory, with the same
    /// semantics as [`ListingQuery::to_sql`].
    pub fn apply<R: Record>(&self, rows: impl IntoIterator<Item = R>) -> Vec<R> {
        let mut rows: Vec<R> = rows
            .into_iter()
            .filter(|row| match &self.filter {
                Some(filter) => row
                    .column(filter.column)
                    .as_text()
                    .is_some_and(|text| text.contains(&filter.pattern)),
                None => true,
            })
            .collect();

        match &self.sort {
            Some(sort) => rows.sort_by(|a, b| {
                for column in &sort.columns {
                    let ordering = a
                        .column(column)
                        .partial_cmp(&b.column(column))
                        .unwrap_or(Ordering::Equal);
                    let ordering = match sort.direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    };
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                Ordering::Equal
            }),
            None => rows.sort_by_key(|row| row.id()),
        }

        match self.page {
            Some(page) => rows
                .into_iter()
                .skip(usize::try_from(page.offset).unwrap_or(usize::MAX))
                .take(usize::try_from(page.limit).unwrap_or(usize::MAX))
                .collect(),
            None => rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::company::Company;

    fn request() -> ListingRequest {
        ListingRequest::default()
    }

    fn companies() -> Vec<Company> {
        vec![
            Company { id: 1, name: "Orbita".into(), city: Some("Kazan".into()) },
            Company { id: 2, name: "Bastion".into(), city: Some("Omsk".into()) },
            Company { id: 3, name: "Cordon".into(), city: None },
            Company { id: 4, name: "Aurora".into(), city: Some("Kazan".into()) },
        ]
    }

    #[test]
    fn test_default_request_is_unbounded() {
        let query = build::<Company>(&request());
        assert!(query.is_unbounded());
        assert!(query.sort.is_none());
        assert_eq!(query.apply(companies()).len(), 4);
    }

    #[test]
    fn test_page_offset_is_number_times_size() {
        let mut request = request();
        request.page_number = 2;
        request.page_size = 10;
        let query = build::<Company>(&request);
        assert_eq!(query.page, Some(ListingPage { limit: 10, offset: 20 }));
    }

    #[test]
    fn test_negative_page_values_disable_paging() {
        let mut request = request();
        request.page_number = 1;
        request.page_size = -1;
        assert!(build::<Company>(&request).page.is_none());

        request.page_number = -1;
        request.page_size = 5;
        assert!(build::<Company>(&request).page.is_none());
    }

    #[test]
    fn test_unknown_filter_column_is_dropped() {
        let mut request = request();
        request.filter = FilterOptions {
            column: "name; DROP TABLE companies".into(),
            pattern: "x".into(),
        };
        let query = build::<Company>(&request);
        assert!(query.filter.is_none());
        assert!(!query.to_sql().sql.contains("DROP"));
    }

    #[test]
    fn test_unknown_sort_column_drops_whole_sort() {
        let mut request = request();
        request.sort = SortOptions {
            direction: SortDirection::Desc,
            columns: vec!["name".into(), "password_hash".into()],
        };
        assert!(build::<Company>(&request).sort.is_none());
    }

    #[test]
    fn test_filter_sql_is_parameterised() {
        let mut request = request();
        request.filter = FilterOptions { column: "name".into(), pattern: "50%_off\\".into() };
        request.page_number = 0;
        request.page_size = 25;
        let statement = build::<Company>(&request).to_sql();

        assert_eq!(
            statement.sql,
            "SELECT id, name, city FROM companies WHERE name::text LIKE $1 ESCAPE '\\' ORDER BY id ASC LIMIT $2 OFFSET $3"
        );
        assert_eq!(
            statement.binds,
            vec![
                SqlBind::Text("%50\\%\\_off\\\\%".into()),
                SqlBind::Int(25),
                SqlBind::Int(0),
            ]
        );
    }

    #[test]
    fn test_multi_column_sort_sql() {
        let mut request = request();
        request.sort = SortOptions {
            direction: SortDirection::Desc,
            columns: vec!["city".into(), " name ".into()],
        };
        let statement = build::<Company>(&request).to_sql();
        assert_eq!(statement.sql, "SELECT id, name, city FROM companies ORDER BY city DESC, name DESC");
        assert!(statement.binds.is_empty());
    }

    #[test]
    fn test_descending_reverses_ascending() {
        let mut request = request();
        request.sort = SortOptions { direction: SortDirection::Asc, columns: vec!["name".into()] };
        let ascending: Vec<i64> = build::<Company>(&request).apply(companies()).iter().map(|c| c.id).collect();

        request.sort.direction = SortDirection::Desc;
        let mut descending: Vec<i64> = build::<Company>(&request).apply(companies()).iter().map(|c| c.id).collect();
        descending.reverse();

        assert_eq!(ascending, vec![4, 2, 3, 1]);
        assert_eq!(ascending, descending);
    }

    #[test]
    fn test_in_memory_filter_and_page() {
        let mut request = request();
        request.filter = FilterOptions { column: "city".into(), pattern: "Kaz".into() };
        let matched = build::<Company>(&request).apply(companies());
        assert_eq!(matched.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 4]);

        request.page_number = 1;
        request.page_size = 1;
        let second_page = build::<Company>(&request).apply(companies());
        assert_eq!(second_page.iter().map(|c| c.id).collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn test_in_memory_pattern_is_literal() {
        let mut request = request();
        request.filter = FilterOptions { column: "name".into(), pattern: "%".into() };
        assert!(build::<Company>(&request).apply(companies()).is_empty());
    }

    #[test]
    fn test_nulls_sort_last_ascending() {
        let mut request = request();
        request.sort = SortOptions { direction: SortDirection::Asc, columns: vec!["city".into()] };
        let ordered = build::<Company>(&request).apply(companies());
        assert_eq!(ordered.last().map(|c| c.id), Some(3));
    }

    #[test]
    fn test_sort_direction_accepts_both_cases() {
        let lower: SortDirection = serde_json::from_str("\"desc\"").unwrap();
        let upper: SortDirection = serde_json::from_str("\"DESC\"").unwrap();
        assert_eq!(lower, SortDirection::Desc);
        assert_eq!(upper, SortDirection::Desc);
    }
}
