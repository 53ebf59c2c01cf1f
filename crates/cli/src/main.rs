use std::{env, time::Duration};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use halbridge_provider::{DataProvider, ProviderConfig, ProviderError, data_provider};
use halbridge_types::{
    CreateParams, DeleteParams, GetManyParams, GetManyReferenceParams, GetOneParams, ListParams, Operation, Pagination, Request, Sort,
    SortOrder, UpdateParams,
};
use serde_json::{Map, Value};
use tracing::debug;

/// Environment variable read for the API root when `--api-url` is not given.
const API_URL_ENV: &str = "HALBRIDGE_API_URL";

#[derive(Debug, Parser)]
#[command(name = "halbridge", version, about = "Run admin data operations against a HAL REST API")]
struct Cli {
    /// API root to discover links from
    #[arg(long, global = true, env = API_URL_ENV)]
    api_url: Option<String>,

    /// Trace each operation and its outcome
    #[arg(long, global = true)]
    debug: bool,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// GET_LIST: a page of a resource collection
    List {
        resource: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// GET_ONE: one resource by id or URL
    Get { resource: String, id: String },
    /// GET_MANY: several resources by id or URL
    GetMany {
        resource: String,
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// GET_MANY_REFERENCE: resources pointing at another through `target`
    References {
        resource: String,
        #[arg(long)]
        target: String,
        #[arg(long)]
        id: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// CREATE: post a JSON record
    Create {
        resource: String,
        #[arg(long)]
        data: String,
    },
    /// UPDATE: put a JSON record back to its self link
    Update {
        resource: String,
        id: String,
        #[arg(long)]
        data: String,
    },
    /// DELETE: remove a resource, printing its last representation
    Delete { resource: String, id: String },
    /// Run any operation from its type name and params JSON
    Exec {
        kind: String,
        resource: String,
        #[arg(default_value = "{}")]
        params: String,
    },
}

#[derive(Debug, Args)]
struct ListArgs {
    /// One-based page number
    #[arg(long, default_value_t = 1)]
    page: u64,

    #[arg(long, default_value_t = 25)]
    per_page: u64,

    /// Sort as `field` or `field:DESC`
    #[arg(long)]
    sort: Option<String>,

    /// Filter as `key=value`; repeat a key to filter on several values
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    filters: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let api_url = cli
        .api_url
        .clone()
        .context("missing API root; pass --api-url or set HALBRIDGE_API_URL")?;

    let mut config = ProviderConfig::from_env();
    config.debug |= cli.debug;
    config.client.timeout = Duration::from_secs(cli.timeout_secs);
    debug!(%api_url, debug = config.debug, "provider configured");
    let provider = data_provider(&api_url, config)?;

    let outcome = match cli.command {
        Command::Exec { kind, resource, params } => {
            let params: Value = serde_json::from_str(&params).context("params must be valid JSON")?;
            provider.execute_raw(&kind, &resource, params).await
        }
        command => provider.execute(build_request(command)?).await,
    };

    match outcome {
        Ok(envelope) => println!("{}", serde_json::to_string_pretty(&envelope)?),
        Err(ProviderError::Http(error)) => bail!("HTTP {}: {}", error.status, error.message),
        Err(error) => return Err(error.into()),
    }
    Ok(())
}

fn init_tracing() {
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_request(command: Command) -> Result<Request> {
    let (resource, operation) = match command {
        Command::List { resource, list } => (resource, Operation::GetList(list.into_params()?)),
        Command::Get { resource, id } => (resource, Operation::GetOne(GetOneParams { id: id.into() })),
        Command::GetMany { resource, ids } => (
            resource,
            Operation::GetMany(GetManyParams {
                ids: ids.into_iter().map(Into::into).collect(),
            }),
        ),
        Command::References {
            resource,
            target,
            id,
            list,
        } => (
            resource,
            Operation::GetManyReference(GetManyReferenceParams {
                target,
                id: id.into(),
                list: list.into_params()?,
            }),
        ),
        Command::Create { resource, data } => (resource, Operation::Create(CreateParams { data: parse_record(&data)? })),
        Command::Update { resource, id, data } => (
            resource,
            Operation::Update(UpdateParams {
                id: Some(id.into()),
                data: parse_record(&data)?,
                previous_data: None,
            }),
        ),
        Command::Delete { resource, id } => (
            resource,
            Operation::Delete(DeleteParams {
                id: id.into(),
                previous_data: None,
            }),
        ),
        Command::Exec { .. } => bail!("exec takes raw params and is not built into a typed request"),
    };
    Ok(Request::new(resource, operation))
}

impl ListArgs {
    fn into_params(self) -> Result<ListParams> {
        let sort = self.sort.as_deref().map(parse_sort).transpose()?;
        Ok(ListParams {
            pagination: Some(Pagination {
                page: self.page,
                per_page: self.per_page,
            }),
            sort,
            filter: parse_filters(&self.filters)?,
        })
    }
}

fn parse_sort(raw: &str) -> Result<Sort> {
    let (field, order) = match raw.split_once(':') {
        Some((field, order)) => (field, order),
        None => (raw, "ASC"),
    };
    let order = match order.to_ascii_uppercase().as_str() {
        "ASC" => SortOrder::Asc,
        "DESC" => SortOrder::Desc,
        other => bail!("sort order must be ASC or DESC; got '{other}'"),
    };
    if field.is_empty() {
        bail!("sort field must not be empty");
    }
    Ok(Sort {
        field: field.to_string(),
        order,
    })
}

/// Collect `key=value` filters. Values that parse as JSON keep their type;
/// a repeated key collects its values into an array.
fn parse_filters(raw: &[String]) -> Result<Map<String, Value>> {
    let mut filter = Map::new();
    for entry in raw {
        let (key, value) = entry
            .split_once('=')
            .with_context(|| format!("filter '{entry}' must look like key=value"))?;
        let value = serde_json::from_str::<Value>(value).unwrap_or_else(|_| Value::String(value.to_string()));
        match filter.get_mut(key) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                filter.insert(key.to_string(), value);
            }
        }
    }
    Ok(filter)
}

fn parse_record(raw: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw).context("data must be valid JSON")? {
        Value::Object(record) => Ok(record),
        _ => bail!("data must be a JSON object"),
    }
}
