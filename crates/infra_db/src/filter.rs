//! SQL rendering of criteria filters
//!
//! Each adapter owns a static [`ColumnTable`] mapping logical field names to
//! column names. Filters are appended to a `QueryBuilder` as bound
//! parameters; only column names from the table are ever spliced into SQL.

use sqlx::{Postgres, QueryBuilder};

use core_kernel::{Filter, FilterValue, MatchStrategy, PortError};

/// Logical field name to column name
pub type ColumnTable = &'static [(&'static str, &'static str)];

/// Looks up the column for a logical field
pub fn column_for(columns: ColumnTable, field: &str) -> Option<&'static str> {
    columns
        .iter()
        .find(|(logical, _)| *logical == field)
        .map(|(_, column)| *column)
}

/// Escapes `LIKE` metacharacters so the value matches literally
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Appends a `WHERE` clause for `filters`, joined with `AND`
///
/// Nothing is appended when `filters` is empty.
///
/// # Errors
///
/// Returns `PortError::Internal` if a filter names a field missing from
/// `columns`.
pub fn push_filters(
    builder: &mut QueryBuilder<'_, Postgres>,
    filters: &[Filter],
    columns: ColumnTable,
) -> Result<(), PortError> {
    for (index, filter) in filters.iter().enumerate() {
        let column = column_for(columns, filter.field)
            .ok_or_else(|| PortError::internal(format!("No column mapped for field '{}'", filter.field)))?;

        builder.push(if index == 0 { " WHERE " } else { " AND " });
        builder.push(column);

        match (&filter.value, filter.strategy) {
            (FilterValue::Text(text), MatchStrategy::ContainsIgnoreCase) => {
                builder.push(" ILIKE ");
                builder.push_bind(format!("%{}%", escape_like(text)));
            }
            (FilterValue::Text(text), MatchStrategy::Exact) => {
                builder.push(" = ");
                builder.push_bind(text.clone());
            }
            (FilterValue::Uuid(uuid), _) => {
                builder.push(" = ");
                builder.push_bind(*uuid);
            }
            (FilterValue::Date(date), _) => {
                builder.push(" = ");
                builder.push_bind(*date);
            }
        }
    }
    Ok(())
}
