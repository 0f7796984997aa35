use anyhow::{Context, Result};
use clap::Parser;
use pureid::{
    classify, count_distinct_identifiers, find_identifiers, load,
    report::{render_count, render_find, OutputFormat},
    MatchPolicy, NameSource, RoleOverrides,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "pureid",
    version,
    about = "Pure ID counter and finder for CSV exports of unknown encoding"
)]
struct Args {
    /// Path to the persons CSV (e.g. Persons_and_Affiliations.csv)
    csv: PathBuf,
    #[arg(long, help = "Count distinct Pure IDs")]
    count: bool,
    #[arg(
        long,
        num_args = 2,
        value_names = ["FIRST_NAME", "LAST_NAME"],
        help = "Find Pure IDs for a given first name and surname"
    )]
    find: Option<Vec<String>>,
    #[arg(long, help = "Exact name match (default: substring)")]
    exact: bool,
    #[arg(long, help = "Column name for the Pure ID (e.g. 'Pure ID')")]
    pure_col: Option<String>,
    #[arg(long, help = "Column name for first name (e.g. 'First name(s)')")]
    first_col: Option<String>,
    #[arg(long, help = "Column name for last name (e.g. 'Last name')")]
    last_col: Option<String>,
    #[arg(long, help = "Single full-name column, if present")]
    name_col: Option<String>,
    #[arg(long, help = "Output machine-readable JSON")]
    json: bool,
}

fn main() -> Result<()> {
    // ─── 1) init logging (stderr, so results stay alone on stdout) ───
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    // ─── 2) load + classify ──────────────────────────────────────────
    let table = load(&args.csv).with_context(|| format!("loading {}", args.csv.display()))?;

    let overrides = RoleOverrides {
        identifier: args.pure_col.clone(),
        first_name: args.first_col.clone(),
        last_name: args.last_col.clone(),
        full_name: args.name_col.clone(),
    };
    let roles = classify(table.headers()).with_overrides(&overrides);

    info!("rows: {}", table.len());
    info!("columns: {:?}", table.headers());
    info!("pure id column: {:?}", roles.identifier);
    match roles.name_source() {
        NameSource::FirstLast { first, last } => info!("first: {first} | last: {last}"),
        NameSource::Full(col) => info!("name: {col}"),
        NameSource::Unavailable => warn!("no name columns detected; --find may return nothing"),
    }
    for (role, col) in roles.absent_from(table.headers()) {
        warn!("{role} column {col:?} is not in the file");
    }

    // ─── 3) dispatch ─────────────────────────────────────────────────
    let mut did = false;
    if args.count {
        let n = count_distinct_identifiers(&table, &roles);
        println!("{}", render_count(n, format)?);
        did = true;
    }

    if let Some([first, last]) = args.find.as_deref() {
        let policy = if args.exact {
            MatchPolicy::Exact
        } else {
            MatchPolicy::Substring
        };
        let ids = find_identifiers(&table, &roles, first, last, policy);
        println!("{}", render_find(first, last, policy, &ids, format)?);
        did = true;
    }

    if !did {
        let n = count_distinct_identifiers(&table, &roles);
        println!("{}", render_count(n, format)?);
    }

    Ok(())
}
