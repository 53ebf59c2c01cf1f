//! # halbridge provider
//!
//! Serves the admin UI data contract (`GET_LIST`, `GET_ONE`, `GET_MANY`,
//! `GET_MANY_REFERENCE`, `CREATE`, `UPDATE`, `DELETE`) from a HAL REST API.
//!
//! Every call runs the same pipeline:
//!
//! 1. **plan**: the operation is mapped to a declarative [`NavigationPlan`]
//!    (pure, no I/O)
//! 2. **discover**: the API root is fetched; nothing is cached between calls
//! 3. **execute**: the plan's navigations are performed from the root
//! 4. **normalize**: resources become flat records with a non-null `id`
//!
//! After every navigation the response status is checked and error documents
//! are translated into the uniform [`HttpError`](halbridge_types::HttpError).
//!
//! [`DiagnosticLayer`] wraps any [`DataProvider`] to trace requests and
//! outcomes; [`data_provider`] wires everything from a [`ProviderConfig`].
//!
//! ```ignore
//! use halbridge_provider::{DataProvider, ProviderConfig, data_provider};
//! use serde_json::json;
//!
//! let provider = data_provider("http://localhost:8080/api", ProviderConfig::default())?;
//! let page = provider
//!     .execute_raw("GET_LIST", "books", json!({ "pagination": { "page": 1, "perPage": 10 } }))
//!     .await?;
//! println!("{} books", page.total.unwrap_or_default());
//! ```

mod config;
mod diagnostics;
mod error;
mod execute;
mod normalize;
mod plan;
mod provider;
mod translate;

pub use config::{DEBUG_ENV, ProviderConfig};
pub use diagnostics::{DiagnosticEntry, DiagnosticLayer, DiagnosticSink, NoopSink, TracingSink};
pub use error::ProviderError;
pub use execute::execute_plan;
pub use normalize::{normalize_collection, normalize_record, read_total, with_requested_id};
pub use plan::{NavigationPlan, PlanOperation, Target, TotalSource, plan_request};
pub use provider::{DataProvider, HalDataProvider, data_provider};
pub use translate::{GENERIC_ERROR_MESSAGE, ensure_success, error_message};
