use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, trace};

/// Header plus rows, before provenance is attached.
#[derive(Debug)]
pub struct Parsed {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub skipped: usize,
}

fn to_cells(record: &StringRecord) -> Vec<String> {
    record.iter().map(str::to_string).collect()
}

/// Fails on the first record whose field count differs from the header.
pub fn parse_strict(text: &str) -> Result<Parsed, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers = to_cells(rdr.headers()?);
    let mut rows = Vec::new();
    for result in rdr.records() {
        rows.push(to_cells(&result?));
    }

    Ok(Parsed {
        headers,
        rows,
        skipped: 0,
    })
}

/// Never rejects the whole input. Records shorter than the header are padded
/// with empty cells; longer or untokenisable records are skipped.
pub fn parse_lenient(text: &str) -> Result<Parsed, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = to_cells(rdr.headers()?);
    let width = headers.len();
    let mut rows = Vec::new();
    let mut skipped = 0;

    for (idx, result) in rdr.records().enumerate() {
        match result {
            Ok(record) if record.len() <= width => {
                let mut row = to_cells(&record);
                row.resize(width, String::new());
                rows.push(row);
            }
            Ok(record) => {
                trace!(record = idx, fields = record.len(), width, "skipping long record");
                skipped += 1;
            }
            Err(e) if e.is_io_error() => return Err(e),
            Err(e) => {
                trace!(record = idx, error = %e, "skipping broken record");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        debug!(skipped, "lenient parse dropped malformed records");
    }
    Ok(Parsed {
        headers,
        rows,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAGGED: &str = "id,first,last\nP1,Jane,Doe\nP2,John\nP3,A,B,extra\nP4,Ann,Lee\n";

    #[test]
    fn strict_accepts_well_formed() {
        let p = parse_strict("id,name\nP1,\"Doe, Jane\"\nP2,\n").unwrap();
        assert_eq!(p.headers, vec!["id", "name"]);
        assert_eq!(p.rows, vec![vec!["P1", "Doe, Jane"], vec!["P2", ""]]);
    }

    #[test]
    fn strict_rejects_ragged() {
        assert!(parse_strict(RAGGED).is_err());
    }

    #[test]
    fn lenient_pads_short_and_skips_long() {
        let p = parse_lenient(RAGGED).unwrap();
        assert_eq!(p.skipped, 1);
        assert_eq!(
            p.rows,
            vec![
                vec!["P1", "Jane", "Doe"],
                vec!["P2", "John", ""],
                vec!["P4", "Ann", "Lee"],
            ]
        );
    }

    #[test]
    fn literal_na_tokens_survive() {
        let p = parse_strict("id,name\nNA,null\n").unwrap();
        assert_eq!(p.rows[0], vec!["NA", "null"]);
    }

    #[test]
    fn empty_input() {
        let p = parse_lenient("").unwrap();
        assert!(p.headers.is_empty());
        assert!(p.rows.is_empty());
    }
}
