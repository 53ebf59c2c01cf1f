use std::sync::Arc;

use async_trait::async_trait;
use halbridge_api::{HalHttpClient, HalTransport, Navigator};
use halbridge_types::{Operation, OperationKind, Request, ResultEnvelope};
use serde_json::Value;
use tracing::debug;

use crate::{
    DiagnosticLayer, NoopSink, ProviderConfig, ProviderError, TracingSink, ensure_success, execute_plan, plan_request,
};

/// The admin UI data contract.
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn execute(&self, request: Request) -> Result<ResultEnvelope, ProviderError>;

    /// Execute an operation given in its untyped wire form, e.g.
    /// `("GET_LIST", "books", {"pagination": ...})`.
    ///
    /// Unknown operation types fail with [`ProviderError::Unsupported`]
    /// before any request is made.
    async fn execute_raw(&self, kind: &str, resource: &str, params: Value) -> Result<ResultEnvelope, ProviderError> {
        let kind: OperationKind = kind.parse()?;
        let operation =
            Operation::from_params(kind, params).map_err(|error| ProviderError::invalid_params(kind, resource, error.to_string()))?;
        self.execute(Request::new(resource, operation)).await
    }
}

/// [`DataProvider`] that answers each request by navigating a HAL API.
///
/// Holds no state between calls beyond its configuration: the API root is
/// discovered afresh for every request.
#[derive(Clone)]
pub struct HalDataProvider {
    api_url: String,
    transport: Arc<dyn HalTransport>,
}

impl HalDataProvider {
    pub fn new(api_url: impl Into<String>, transport: Arc<dyn HalTransport>) -> Self {
        Self {
            api_url: api_url.into(),
            transport,
        }
    }
}

#[async_trait]
impl DataProvider for HalDataProvider {
    async fn execute(&self, request: Request) -> Result<ResultEnvelope, ProviderError> {
        let plan = plan_request(&request)?;
        debug!(kind = %request.kind(), resource = %request.resource, "operation planned");

        let entry = ensure_success(Navigator::discover(Arc::clone(&self.transport), &self.api_url).await?)?;
        execute_plan(&entry, plan).await
    }
}

/// Build the provider for `api_url`: a [`HalDataProvider`] over the `reqwest`
/// transport, wrapped in a [`DiagnosticLayer`] that traces only when
/// `config.debug` is set.
///
/// # Arguments
/// * `api_url` - Root of the HAL API; discovered afresh on every call
/// * `config` - Debug flag and HTTP client settings
///
/// # Errors
/// Fails with [`ProviderError::Transport`] when `api_url` is not an absolute
/// `http`/`https` URL or the HTTP client cannot be built. No request is sent
/// here.
///
/// # Example
/// ```no_run
/// use halbridge_provider::{DataProvider, ProviderConfig, data_provider};
/// use serde_json::json;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), halbridge_provider::ProviderError> {
/// let provider = data_provider("http://localhost:8080/api", ProviderConfig::from_env())?;
/// let page = provider
///     .execute_raw("GET_LIST", "books", json!({ "pagination": { "page": 1, "perPage": 10 } }))
///     .await?;
/// println!("{} of {:?} books", page.records().len(), page.total);
/// # Ok(())
/// # }
/// ```
pub fn data_provider(api_url: &str, config: ProviderConfig) -> Result<DiagnosticLayer<HalDataProvider>, ProviderError> {
    halbridge_api::validate_root_url(api_url)?;
    let transport = Arc::new(HalHttpClient::new(&config.client)?);
    let provider = HalDataProvider::new(api_url, transport);

    let layer = if config.debug {
        DiagnosticLayer::with_sink(provider, Arc::new(TracingSink))
    } else {
        DiagnosticLayer::with_sink(provider, Arc::new(NoopSink))
    };
    Ok(layer)
}
