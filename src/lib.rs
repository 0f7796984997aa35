//! Person-identifier lookup over messy CSV exports.
//!
//! [`load::load`] decodes a file of unknown encoding into a [`Table`],
//! [`columns::classify`] guesses which headers hold the identifier and the
//! name parts, and [`resolve`] counts identifiers or finds the identifiers
//! belonging to a name.

pub mod columns;
pub mod error;
pub mod load;
pub mod normalize;
pub mod report;
pub mod resolve;

pub use columns::{classify, ColumnRoles, NameSource, Role, RoleOverrides};
pub use error::{LoadError, LoadResult};
pub use load::{load, ParseStrategy, Table};
pub use normalize::normalize;
pub use resolve::{count_distinct_identifiers, find_identifiers, MatchPolicy};
