// src/load/mod.rs
//! Encoding-resilient CSV loading.
//!
//! The raw bytes are decoded under an ordered list of candidate encodings and
//! tokenised first strictly, then leniently. The first (strategy, encoding)
//! pair that works wins. If none does, the bytes are decoded as UTF-8 with
//! replacement characters and parsed leniently, which always succeeds.

pub mod encoding;
pub mod parse;
pub mod table;

pub use encoding::{candidates, detect, Candidate, FALLBACKS};
pub use table::{ParseStrategy, Provenance, Row, Table};

use crate::error::{LoadError, LoadResult};
use parse::{parse_lenient, parse_strict, Parsed};
use std::{fs, io, path::Path};
use tracing::{debug, info, trace, warn};

const LOSSY_LABEL: &str = "utf-8 (lossy)";

/// Read `path` and decode it into a [`Table`].
///
/// Fails only when the file is missing or unreadable.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load<P: AsRef<Path>>(path: P) -> LoadResult<Table> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    debug!(bytes = bytes.len(), "read input");

    let table = load_from_bytes(&bytes).ok_or_else(|| LoadError::Unparsable {
        path: path.to_path_buf(),
    })?;

    let prov = table.provenance();
    info!(
        rows = table.len(),
        encoding = %prov.encoding,
        strategy = %prov.strategy,
        skipped = prov.skipped_rows,
        "loaded table"
    );
    Ok(table)
}

/// Decode and tokenise in-memory bytes. `None` only if the lossy last resort
/// fails to tokenise, which does not happen for in-memory input.
pub fn load_from_bytes(bytes: &[u8]) -> Option<Table> {
    let cands = candidates(detect(bytes));

    // decode each candidate once; both strategies reuse the text
    let decoded: Vec<_> = cands
        .iter()
        .map(|c| {
            let text = c.decode(bytes);
            if text.is_none() {
                trace!(encoding = c.label(), "decode rejected");
            }
            (c, text)
        })
        .collect();

    for strategy in [ParseStrategy::Strict, ParseStrategy::Lenient] {
        for (cand, text) in &decoded {
            let Some(text) = text else { continue };
            let parsed = match strategy {
                ParseStrategy::Strict => parse_strict(text),
                _ => parse_lenient(text),
            };
            match parsed {
                Ok(p) => return Some(into_table(p, cand.label(), strategy)),
                Err(e) => debug!(encoding = cand.label(), %strategy, error = %e, "parse failed"),
            }
        }
    }

    warn!("every candidate encoding failed, decoding as lossy UTF-8");
    last_resort(bytes)
}

fn last_resort(bytes: &[u8]) -> Option<Table> {
    let text = String::from_utf8_lossy(bytes);
    match parse_lenient(&text) {
        Ok(p) => Some(into_table(p, LOSSY_LABEL, ParseStrategy::Lossy)),
        Err(e) => {
            warn!(error = %e, "lossy parse failed");
            None
        }
    }
}

fn into_table(parsed: Parsed, encoding: &str, strategy: ParseStrategy) -> Table {
    Table::new(
        parsed.headers,
        parsed.rows,
        Provenance {
            encoding: encoding.to_string(),
            strategy,
            skipped_rows: parsed.skipped,
        },
    )
}
