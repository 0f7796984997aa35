use serde::Serialize;
use std::fmt;

/// Which tokenizer produced a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseStrategy {
    /// Every record must have exactly the header's field count.
    Strict,
    /// Short records are padded, long or broken records are skipped.
    Lenient,
    /// UTF-8 with replacement characters, parsed leniently.
    Lossy,
}

impl fmt::Display for ParseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParseStrategy::Strict => "strict",
            ParseStrategy::Lenient => "lenient",
            ParseStrategy::Lossy => "lossy",
        };
        f.write_str(s)
    }
}

/// How a table came to be. Advisory only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provenance {
    /// Label of the candidate encoding that decoded the bytes.
    pub encoding: String,
    pub strategy: ParseStrategy,
    /// Records dropped because they had more fields than the header.
    pub skipped_rows: usize,
}

/// A decoded CSV: header names as the file presents them plus string cells.
///
/// Every row has exactly `headers.len()` cells. Duplicate header names are
/// kept; name lookups resolve to the first column with that name.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    provenance: Provenance,
}

impl Table {
    pub(crate) fn new(headers: Vec<String>, rows: Vec<Vec<String>>, provenance: Provenance) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == headers.len()));
        Self {
            headers,
            rows,
            provenance,
        }
    }

    /// Build a table from in-memory cells. Rows are padded or truncated to the
    /// header width so the width invariant holds.
    pub fn from_rows<H, R, C>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|r| {
                let mut row: Vec<String> = r.into_iter().map(Into::into).collect();
                row.resize(width, String::new());
                row
            })
            .collect();
        Self::new(
            headers,
            rows,
            Provenance {
                encoding: "utf-8".into(),
                strategy: ParseStrategy::Strict,
                skipped_rows: 0,
            },
        )
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Position of the first column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.rows.iter().map(move |cells| Row {
            headers: &self.headers,
            cells,
        })
    }

    /// All cells of column `name`, in row order. `None` if no such column.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |r| r[idx].as_str()))
    }
}

/// Borrowed view of one record, addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    headers: &'a [String],
    cells: &'a [String],
}

impl<'a> Row<'a> {
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.headers.iter().position(|h| h == column)?;
        self.cells.get(idx).map(String::as_str)
    }

    pub fn cells(&self) -> &'a [String] {
        self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_keeps_width() {
        let t = Table::from_rows(["a", "b"], vec![vec!["1"], vec!["1", "2", "3"]]);
        assert_eq!(t.len(), 2);
        for row in t.rows() {
            assert_eq!(row.cells().len(), 2);
        }
        let first = t.rows().next().unwrap();
        assert_eq!(first.get("b"), Some(""));
    }

    #[test]
    fn duplicate_headers_resolve_to_first() {
        let t = Table::from_rows(["id", "id"], vec![vec!["x", "y"]]);
        assert_eq!(t.headers().len(), 2);
        assert_eq!(t.rows().next().unwrap().get("id"), Some("x"));
        assert_eq!(t.column("id").unwrap().collect::<Vec<_>>(), vec!["x"]);
        assert!(t.column("missing").is_none());
    }
}
