// src/columns/mod.rs
//! Header heuristics: which column holds the person identifier and which hold
//! name parts.
//!
//! Each role has an ordered list of case-insensitive patterns. Patterns are
//! tried in order; for a pattern, headers are scanned in file order and the
//! first hit wins. A role with no hit under any pattern stays unresolved.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Identifier,
    FirstName,
    LastName,
    FullName,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Identifier,
        Role::FirstName,
        Role::LastName,
        Role::FullName,
    ];

    /// Ordered patterns for this role, most specific first.
    pub fn patterns(self) -> &'static [&'static str] {
        match self {
            Role::Identifier => &[
                r"\bpure\b.*\bid\b",
                r"\bid\b.*\bpure\b",
                r"^pure[_\s-]?id$",
                r"^person[_\s-]?id$",
                r"^pure person id$",
            ],
            Role::FirstName => &[
                r"^first\s*names?(?:\(s\))?$",
                r"\bgiven\b.*\bname\b",
                r"\bforename\b",
                r"\bpreferred\s*name\b",
            ],
            Role::LastName => &[
                r"^last\s*names?(?:\(s\))?$",
                r"\bfamily\b.*\bname\b",
                r"\bsurname\b",
            ],
            Role::FullName => &[
                r"^name$",
                r"\bperson\b.*\bname\b",
                r"\bdisplay\s*name\b",
                r"\bfull\s*name\b",
            ],
        }
    }

    fn rules(self) -> &'static [Regex] {
        &RULES[self as usize]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Identifier => "identifier",
            Role::FirstName => "first name",
            Role::LastName => "last name",
            Role::FullName => "full name",
        };
        f.write_str(s)
    }
}

/// Compiled patterns, indexed like [`Role::ALL`].
static RULES: Lazy<Vec<Vec<Regex>>> = Lazy::new(|| {
    Role::ALL
        .iter()
        .map(|role| {
            role.patterns()
                .iter()
                .map(|p| {
                    RegexBuilder::new(p)
                        .case_insensitive(true)
                        .build()
                        .expect("column pattern must compile")
                })
                .collect()
        })
        .collect()
});

/// First header matched by the earliest pattern that matches anything.
pub fn pick_column<'a>(headers: &'a [String], rules: &[Regex]) -> Option<&'a str> {
    rules
        .iter()
        .find_map(|rx| headers.iter().find(|h| rx.is_match(h)))
        .map(String::as_str)
}

/// Header chosen for `role`, if any.
pub fn detect(headers: &[String], role: Role) -> Option<String> {
    pick_column(headers, role.rules()).map(str::to_string)
}

/// Column names bound to each role. Unresolved roles are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnRoles {
    pub identifier: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
}

/// Caller-supplied column names. A `Some` replaces the detected column
/// unconditionally.
pub type RoleOverrides = ColumnRoles;

/// Where a row's full name comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource<'a> {
    FirstLast { first: &'a str, last: &'a str },
    Full(&'a str),
    Unavailable,
}

impl ColumnRoles {
    pub fn get(&self, role: Role) -> Option<&str> {
        match role {
            Role::Identifier => self.identifier.as_deref(),
            Role::FirstName => self.first_name.as_deref(),
            Role::LastName => self.last_name.as_deref(),
            Role::FullName => self.full_name.as_deref(),
        }
    }

    fn slot(&mut self, role: Role) -> &mut Option<String> {
        match role {
            Role::Identifier => &mut self.identifier,
            Role::FirstName => &mut self.first_name,
            Role::LastName => &mut self.last_name,
            Role::FullName => &mut self.full_name,
        }
    }

    pub fn with_overrides(mut self, overrides: &RoleOverrides) -> Self {
        for role in Role::ALL {
            if let Some(col) = overrides.get(role) {
                *self.slot(role) = Some(col.to_string());
            }
        }
        self
    }

    /// First and last columns together take precedence over a full-name column.
    pub fn name_source(&self) -> NameSource<'_> {
        match (
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.full_name.as_deref(),
        ) {
            (Some(first), Some(last), _) => NameSource::FirstLast { first, last },
            (_, _, Some(full)) => NameSource::Full(full),
            _ => NameSource::Unavailable,
        }
    }

    /// Bound roles whose column is not among `headers`.
    pub fn absent_from<'a>(&'a self, headers: &[String]) -> Vec<(Role, &'a str)> {
        Role::ALL
            .into_iter()
            .filter_map(|role| self.get(role).map(|col| (role, col)))
            .filter(|(_, col)| !headers.iter().any(|h| h == col))
            .collect()
    }
}

/// Detect every role from the header.
pub fn classify(headers: &[String]) -> ColumnRoles {
    let mut roles = ColumnRoles::default();
    for role in Role::ALL {
        *roles.slot(role) = detect(headers, role);
    }
    roles
}
