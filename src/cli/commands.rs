//! CLI command implementations
//!
//! Commands build their JSON payload and return it; `run_command` owns the
//! output envelope so the commands stay testable without stdout.

use std::path::Path;

use serde_json::{json, Map, Value};

use crate::config::PagerConfig;
use crate::filter::Filter;
use crate::observability::Logger;
use crate::pager::{PageExecutor, PageRequest};
use crate::sort::{SortCriterion, SortSpec};
use crate::store::MemoryStore;
use crate::token::{TokenCodec, TOKEN_VERSION};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args())
}

/// Load config, apply the log level, run the command, print the result
pub fn run_command(cli: Cli) -> CliResult<()> {
    let config = load_config(cli.config.as_deref())?;
    Logger::set_min_severity(config.log_level);

    let data = match cli.command {
        Command::Page {
            data,
            sort,
            limit,
            after,
            filter,
        } => page(
            &config,
            &data,
            sort,
            limit,
            after.as_deref(),
            filter.as_deref(),
        )?,
        Command::InspectToken { token } => inspect_token(&config, &token)?,
    };

    write_response(data)
}

/// Load the config file, or defaults when no path is given
pub fn load_config(path: Option<&Path>) -> CliResult<PagerConfig> {
    match path {
        Some(path) => Ok(PagerConfig::load(path)?),
        None => Ok(PagerConfig::default()),
    }
}

/// Fetch one page from a JSON-lines file
pub fn page(
    config: &PagerConfig,
    data: &Path,
    sort: Vec<SortCriterion>,
    limit: Option<usize>,
    after: Option<&str>,
    filter: Option<&str>,
) -> CliResult<Value> {
    let sort = SortSpec::new(sort)?;
    let base = parse_filter(filter)?;
    let store = MemoryStore::load_jsonl(data)?;

    let mut request = PageRequest::new(sort).filter(&base);
    if let Some(limit) = limit {
        request = request.page_size(limit);
    }
    if let Some(token) = after {
        request = request.after(token);
    }

    let executor = PageExecutor::new(store, config.clone());
    let page = executor.execute(&request)?;

    Ok(serde_json::to_value(&page)?)
}

/// Decode a token and describe the position it carries
pub fn inspect_token(config: &PagerConfig, token: &str) -> CliResult<Value> {
    let codec = TokenCodec::new(config.max_token_len);
    let position = codec.try_decode(token)?;

    let fields: Map<String, Value> = position
        .iter()
        .map(|(field, value)| {
            (
                field.clone(),
                json!({ "type": value.type_name(), "value": value.to_json() }),
            )
        })
        .collect();

    Ok(json!({
        "version": TOKEN_VERSION,
        "position": fields,
    }))
}

fn parse_filter(filter: Option<&str>) -> CliResult<Filter> {
    match filter {
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| CliError::invalid_argument(format!("invalid filter: {}", e))),
        None => Ok(Filter::All),
    }
}
