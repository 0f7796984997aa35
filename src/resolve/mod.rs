// src/resolve/mod.rs
//! Name to identifier resolution over a loaded [`Table`].

pub mod count;

pub use count::count_distinct_identifiers;

use serde::Serialize;
use std::{collections::BTreeSet, fmt};
use tracing::{debug, warn};

use crate::columns::{ColumnRoles, NameSource};
use crate::load::{Row, Table};
use crate::normalize::{normalize, normalize_opt};

/// How a target name is compared with a row's normalized full name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Both target parts occur somewhere in the full name, independently.
    #[default]
    Substring,
    /// The full name is exactly "first last" or "last first".
    Exact,
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchPolicy::Substring => "substring",
            MatchPolicy::Exact => "exact",
        })
    }
}

/// Normalized target name, built once per query.
#[derive(Debug, Clone)]
struct Target {
    first: String,
    last: String,
    forward: String,
    reversed: String,
}

impl Target {
    fn new(first: &str, last: &str) -> Self {
        let first = normalize(first);
        let last = normalize(last);
        let forward = format!("{first} {last}").trim().to_string();
        let reversed = format!("{last} {first}").trim().to_string();
        Self {
            first,
            last,
            forward,
            reversed,
        }
    }

    fn matches(&self, candidate: &str, policy: MatchPolicy) -> bool {
        match policy {
            MatchPolicy::Substring => {
                candidate.contains(self.first.as_str()) && candidate.contains(self.last.as_str())
            }
            MatchPolicy::Exact => candidate == self.forward || candidate == self.reversed,
        }
    }
}

/// Raw full name of a row: "first last" trimmed, or the full-name cell
/// verbatim, or empty. Cells of columns missing from the table read as empty.
pub fn full_name(row: &Row<'_>, source: NameSource<'_>) -> String {
    match source {
        NameSource::FirstLast { first, last } => format!(
            "{} {}",
            row.get(first).unwrap_or_default(),
            row.get(last).unwrap_or_default()
        )
        .trim()
        .to_string(),
        NameSource::Full(col) => row.get(col).unwrap_or_default().to_string(),
        NameSource::Unavailable => String::new(),
    }
}

fn normalized_full_name(row: &Row<'_>, source: NameSource<'_>) -> String {
    match source {
        NameSource::Full(col) => normalize_opt(row.get(col)),
        _ => normalize(&full_name(row, source)),
    }
}

/// Distinct, trimmed, non-empty identifiers of every row whose normalized full
/// name matches `first`/`last` under `policy`. Sorted; empty when nothing
/// matches or the identifier role is unresolved.
pub fn find_identifiers(
    table: &Table,
    roles: &ColumnRoles,
    first: &str,
    last: &str,
    policy: MatchPolicy,
) -> BTreeSet<String> {
    let Some(id_col) = roles.identifier.as_deref() else {
        return BTreeSet::new();
    };
    if table.column_index(id_col).is_none() {
        warn!(column = id_col, "identifier column not in table");
        return BTreeSet::new();
    }

    let source = roles.name_source();
    let target = Target::new(first, last);
    debug!(first = %target.first, last = %target.last, %policy, "resolving");

    let ids: BTreeSet<String> = table
        .rows()
        .filter(|row| target.matches(&normalized_full_name(row, source), policy))
        .map(|row| normalize_id(row.get(id_col)))
        .filter(|id| !id.is_empty())
        .collect();

    debug!(matches = ids.len(), "resolved");
    ids
}

fn normalize_id(cell: Option<&str>) -> String {
    cell.map(str::trim).unwrap_or_default().to_string()
}

/// Normalized full name of every row, in row order. Useful for auditing why a
/// row did or did not match.
pub fn normalized_names(table: &Table, roles: &ColumnRoles) -> Vec<String> {
    let source = roles.name_source();
    table
        .rows()
        .map(|row| normalized_full_name(&row, source))
        .collect()
}
