//! Rendering of counter and resolver results for stdout.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::resolve::MatchPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct CountReport {
    distinct_pure_ids: usize,
}

#[derive(Debug, Serialize)]
struct FindReport<'a> {
    first: &'a str,
    last: &'a str,
    policy: MatchPolicy,
    pure_ids: Vec<&'a str>,
}

pub fn render_count(count: usize, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(format!("distinct_pure_ids: {count}")),
        OutputFormat::Json => serde_json::to_string(&CountReport {
            distinct_pure_ids: count,
        }),
    }
}

/// An empty set renders as `(none)` in text and `[]` in JSON.
pub fn render_find(
    first: &str,
    last: &str,
    policy: MatchPolicy,
    ids: &BTreeSet<String>,
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text if ids.is_empty() => Ok("pure_ids_for_name: (none)".to_string()),
        OutputFormat::Text => Ok(format!(
            "pure_ids_for_name: {}",
            ids.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
        )),
        OutputFormat::Json => serde_json::to_string(&FindReport {
            first,
            last,
            policy,
            pure_ids: ids.iter().map(String::as_str).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn text_output() {
        assert_eq!(render_count(3, OutputFormat::Text).unwrap(), "distinct_pure_ids: 3");
        assert_eq!(
            render_find("Jane", "Doe", MatchPolicy::Substring, &set(&["P2", "P10", "A1"]), OutputFormat::Text)
                .unwrap(),
            "pure_ids_for_name: A1, P10, P2"
        );
        assert_eq!(
            render_find("Jane", "Doe", MatchPolicy::Exact, &set(&[]), OutputFormat::Text).unwrap(),
            "pure_ids_for_name: (none)"
        );
    }

    #[test]
    fn json_output() {
        let count: Value = serde_json::from_str(&render_count(0, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(count, json!({ "distinct_pure_ids": 0 }));

        let found: Value = serde_json::from_str(
            &render_find("Jane", "Doe", MatchPolicy::Exact, &set(&["P1"]), OutputFormat::Json).unwrap(),
        )
        .unwrap();
        assert_eq!(
            found,
            json!({ "first": "Jane", "last": "Doe", "policy": "exact", "pure_ids": ["P1"] })
        );
    }
}
