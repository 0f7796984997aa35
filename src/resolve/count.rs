use std::collections::HashSet;
use tracing::warn;

use crate::columns::ColumnRoles;
use crate::load::Table;

/// Number of distinct, trimmed, non-empty values in the identifier column.
///
/// Zero when the identifier role is unresolved or names a missing column.
pub fn count_distinct_identifiers(table: &Table, roles: &ColumnRoles) -> usize {
    let Some(col) = roles.identifier.as_deref() else {
        return 0;
    };
    let Some(cells) = table.column(col) else {
        warn!(column = col, "identifier column not in table");
        return 0;
    };
    cells
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect::<HashSet<_>>()
        .len()
}
