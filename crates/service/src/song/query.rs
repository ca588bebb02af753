//! Filtered, paginated SELECT construction for song search.
//!
//! Only whitelisted column names ever reach the statement text; every
//! filter value, as well as LIMIT and OFFSET, travels as a bound
//! parameter (`$1`, `$2`, ...).

use sea_orm::{DbBackend, Statement, Value};

use models::song as song_model;

use crate::errors::ServiceError;
use crate::song::domain::SearchFilters;

/// Columns eligible for equality filtering, in rendering order.
pub const SEARCH_FIELDS: [&str; 5] = ["group_name", "song_name", "release_date", "song_text", "link"];

pub const SELECT_SONGS: &str = "SELECT id, group_name, song_name, release_date, song_text, link FROM songs";

const RELEASE_DATE_FIELD: &str = "release_date";

/// Statement template plus its ordered argument list.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    sql: String,
    values: Vec<Value>,
}

impl SearchQuery {
    /// Build `base [WHERE f = $n AND ...] ORDER BY group_name ASC, id ASC LIMIT $n OFFSET $m`.
    ///
    /// Filters outside `fields` are ignored, as are empty values.
    /// A `release_date` filter that is not `DD.MM.YYYY` fails the whole build.
    pub fn build(
        fields: &[&str],
        base: &str,
        limit: u64,
        offset: u64,
        filters: &SearchFilters,
    ) -> Result<Self, ServiceError> {
        let mut sql = String::from(base);
        let mut values: Vec<Value> = Vec::with_capacity(fields.len() + 2);

        for &field in fields {
            let Some(raw) = filters.get(field) else { continue };
            if raw.is_empty() {
                continue;
            }
            let value = if field == RELEASE_DATE_FIELD {
                let date = song_model::parse_release_date(raw)
                    .map_err(|e| ServiceError::model("search filter", e))?;
                Value::from(date)
            } else {
                Value::from(raw.clone())
            };
            sql.push_str(if values.is_empty() { " WHERE " } else { " AND " });
            values.push(value);
            sql.push_str(&format!("{field} = ${}", values.len()));
        }

        let limit = i64::try_from(limit)
            .map_err(|_| ServiceError::InvalidArgument(format!("limit {limit} is out of range")))?;
        let offset = i64::try_from(offset)
            .map_err(|_| ServiceError::InvalidArgument(format!("offset {offset} is out of range")))?;

        // id breaks ties so that consecutive pages never overlap
        sql.push_str(" ORDER BY group_name ASC, id ASC");
        values.push(Value::from(limit));
        sql.push_str(&format!(" LIMIT ${}", values.len()));
        values.push(Value::from(offset));
        sql.push_str(&format!(" OFFSET ${}", values.len()));

        Ok(Self { sql, values })
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of equality constraints in the WHERE clause.
    pub fn constraint_count(&self) -> usize {
        self.values.len().saturating_sub(2)
    }

    pub fn into_statement(self, backend: DbBackend) -> Statement {
        Statement::from_sql_and_values(backend, self.sql, self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use chrono::NaiveDate;

    fn filters(pairs: &[(&str, &str)]) -> SearchFilters {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn no_filters_renders_sort_and_window_only() {
        let q = SearchQuery::build(&SEARCH_FIELDS, SELECT_SONGS, 10, 20, &SearchFilters::new()).unwrap();
        assert_eq!(
            q.sql(),
            "SELECT id, group_name, song_name, release_date, song_text, link FROM songs \
             ORDER BY group_name ASC, id ASC LIMIT $1 OFFSET $2"
        );
        assert_eq!(q.values(), &[Value::from(10i64), Value::from(20i64)]);
        assert_eq!(q.constraint_count(), 0);
    }

    #[test]
    fn filters_render_in_whitelist_order_as_bound_parameters() {
        let f = filters(&[("link", "https://example.org"), ("group_name", "Muse")]);
        let q = SearchQuery::build(&SEARCH_FIELDS, SELECT_SONGS, 5, 0, &f).unwrap();
        assert!(q.sql().ends_with(
            "FROM songs WHERE group_name = $1 AND link = $2 ORDER BY group_name ASC, id ASC LIMIT $3 OFFSET $4"
        ));
        assert_eq!(
            q.values(),
            &[
                Value::from("Muse".to_string()),
                Value::from("https://example.org".to_string()),
                Value::from(5i64),
                Value::from(0i64),
            ]
        );
    }

    #[test]
    fn values_never_appear_in_statement_text() {
        let f = filters(&[("song_name", "x'; DROP TABLE songs; --")]);
        let q = SearchQuery::build(&SEARCH_FIELDS, SELECT_SONGS, 1, 0, &f).unwrap();
        assert!(!q.sql().contains("DROP TABLE"));
        assert_eq!(q.values()[0], Value::from("x'; DROP TABLE songs; --".to_string()));
    }

    #[test]
    fn release_date_filter_is_bound_as_a_date() {
        let f = filters(&[("release_date", "16.07.2006")]);
        let q = SearchQuery::build(&SEARCH_FIELDS, SELECT_SONGS, 1, 0, &f).unwrap();
        assert!(q.sql().contains("WHERE release_date = $1"));
        assert_eq!(q.values()[0], Value::from(NaiveDate::from_ymd_opt(2006, 7, 16).unwrap()));
    }

    #[test]
    fn malformed_release_date_fails_the_build() {
        let f = filters(&[("release_date", "2006-07-16")]);
        let err = SearchQuery::build(&SEARCH_FIELDS, SELECT_SONGS, 1, 0, &f).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
    }

    #[test]
    fn unknown_and_empty_filters_are_ignored() {
        let f = filters(&[("id", "1"), ("song_text", ""), ("group_name", "Muse")]);
        let q = SearchQuery::build(&SEARCH_FIELDS, SELECT_SONGS, 1, 0, &f).unwrap();
        assert_eq!(q.constraint_count(), 1);
        assert!(!q.sql().contains("song_text ="));
        assert!(!q.sql().contains(" id ="));
    }

    #[test]
    fn zero_page_size_builds_an_empty_window() {
        let q = SearchQuery::build(&SEARCH_FIELDS, SELECT_SONGS, 0, 0, &SearchFilters::new()).unwrap();
        assert_eq!(q.values(), &[Value::from(0i64), Value::from(0i64)]);
    }

    #[test]
    fn build_is_deterministic() {
        let f = filters(&[("song_name", "Uprising"), ("group_name", "Muse"), ("link", "l")]);
        let a = SearchQuery::build(&SEARCH_FIELDS, SELECT_SONGS, 3, 6, &f).unwrap();
        let b = SearchQuery::build(&SEARCH_FIELDS, SELECT_SONGS, 3, 6, &f).unwrap();
        assert_eq!(a, b);
    }
}
