//! Command-line front end for the record explorer.
//!
//! Reads a request (from flags, a JSON file or stdin), runs it against the
//! demo dataset and prints the JSON response on stdout. Logs go to stderr,
//! filtered by `CRM_EXPLORER_LOG` (default `warn`, `-v` for `debug`).

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use crm_explorer::{
    Explorer, ExplorerConfig, ExplorerError, ExportFormat, ExportRequest, LookupRequest,
    MockDatasetProvider, QueryRequest,
};
use crm_seeker::{ConditionValue, FilterCondition, Operator, SortOrder};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "CRM_EXPLORER_LOG";

/// Query, export and look up CRM records.
#[derive(Parser)]
#[command(name = "crm-explorer", version, about)]
struct Cli {
    /// YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a paged query
    Query(QueryArgs),
    /// Export a whole collection
    Export(ExportArgs),
    /// Look up one record by id
    Get {
        /// Object type (contacts, tags, custom_fields, deals)
        #[arg(short, long)]
        object: String,
        /// Record id
        #[arg(long)]
        id: String,
    },
    /// List the known object types
    Types,
}

#[derive(Args)]
struct QueryArgs {
    /// JSON request file; `-` reads stdin. Overrides the other flags.
    #[arg(long)]
    request: Option<PathBuf>,

    /// Object type (contacts, tags, custom_fields, deals)
    #[arg(short, long)]
    object: Option<String>,

    #[arg(long)]
    page: Option<i64>,

    #[arg(long)]
    page_size: Option<usize>,

    #[arg(long)]
    sort_by: Option<String>,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    #[arg(short, long)]
    search: Option<String>,

    /// Filter as `column:operator:value`. Ranges use `low..high`, `in` lists use `a|b`.
    #[arg(short, long = "filter")]
    filters: Vec<String>,
}

#[derive(Args)]
struct ExportArgs {
    #[arg(short, long)]
    object: String,

    /// json or csv
    #[arg(short, long, default_value = "json")]
    format: String,

    #[arg(short, long)]
    search: Option<String>,

    #[arg(long = "filter")]
    filters: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ExplorerError>() {
                Some(explorer_err) => eprintln!(
                    "error [{} {}]: {}",
                    explorer_err.status_code(),
                    explorer_err.kind(),
                    explorer_err
                ),
                None => eprintln!("error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => ExplorerConfig::from_path(path)?,
        None => ExplorerConfig::default(),
    };
    let explorer = Explorer::new(MockDatasetProvider::new(), config);

    match cli.command {
        Command::Query(args) => {
            let request = query_request(args)?;
            let response = explorer.query(&request)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Export(args) => {
            let request = ExportRequest {
                object_type: Some(args.object),
                format: Some(args.format),
                filter_conditions: Some(parse_filters(&args.filters)?),
                search: args.search,
                ..ExportRequest::default()
            };
            let output = explorer.export(&request)?;
            print!("{}", output.body);
            if output.format == ExportFormat::Json {
                println!();
            }
        }
        Command::Get { object, id } => {
            let record = explorer.lookup(&LookupRequest::new(object, id))?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Types => {
            for object_type in explorer.object_types() {
                println!("{}", object_type);
            }
        }
    }
    Ok(())
}

fn query_request(args: QueryArgs) -> anyhow::Result<QueryRequest> {
    if let Some(path) = args.request {
        let json = if path.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read request from stdin")?;
            buf
        } else {
            std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read request file {}", path.display()))?
        };
        return serde_json::from_str(&json).context("request is not a valid query");
    }

    let filters = parse_filters(&args.filters)?;
    Ok(QueryRequest {
        object_type: args.object,
        page: args.page,
        page_size: args.page_size,
        sort_order: args.sort_by.as_ref().map(|_| {
            if args.desc {
                SortOrder::Desc
            } else {
                SortOrder::Asc
            }
        }),
        sort_by: args.sort_by,
        filter_conditions: (!filters.is_empty()).then_some(filters),
        search: args.search,
    })
}

fn parse_filters(raw: &[String]) -> anyhow::Result<Vec<FilterCondition>> {
    raw.iter().map(|f| parse_filter(f)).collect()
}

/// Parses `column:operator:value`.
fn parse_filter(raw: &str) -> anyhow::Result<FilterCondition> {
    let mut parts = raw.splitn(3, ':');
    let (Some(column), Some(operator), Some(value)) = (parts.next(), parts.next(), parts.next())
    else {
        bail!("filter '{}' must look like column:operator:value", raw);
    };
    if column.is_empty() {
        bail!("filter '{}' has an empty column", raw);
    }

    let operator = Operator::from(operator);
    let condition = match &operator {
        op if op.is_range() => match value.split_once("..") {
            Some((low, high)) => FilterCondition::range(column, operator.clone(), low, high),
            None => bail!("filter '{}' needs a low..high range", raw),
        },
        Operator::In => {
            let members: Vec<ConditionValue> = value.split('|').map(ConditionValue::from).collect();
            FilterCondition::new(column, operator.clone(), ConditionValue::List(members))
        }
        _ => FilterCondition::new(column, operator.clone(), value),
    };
    Ok(condition)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_filters() {
        let f = parse_filter("status:eq:active").unwrap();
        assert_eq!(f, FilterCondition::new("status", Operator::Eq, "active"));
    }

    #[test]
    fn value_may_contain_colons() {
        let f = parse_filter("note:contains:a:b").unwrap();
        assert_eq!(f.value, ConditionValue::from("a:b"));
    }

    #[test]
    fn parses_ranges_and_lists() {
        let f = parse_filter("createdAt:daterange:2024-01-01T00:00:00Z..2024-02-01").unwrap();
        assert_eq!(f.value, ConditionValue::from("2024-01-01T00:00:00Z"));
        assert_eq!(f.value2, Some(ConditionValue::from("2024-02-01")));

        let f = parse_filter("status:in:active|lead").unwrap();
        assert_eq!(f.value, ConditionValue::from(vec!["active", "lead"]));
    }

    #[test]
    fn rejects_malformed_filters() {
        assert!(parse_filter("status").is_err());
        assert!(parse_filter(":eq:x").is_err());
        assert!(parse_filter("score:between:10").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
