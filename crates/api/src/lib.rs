//! HAL navigation client.
//!
//! This crate is the hypermedia side of halbridge. It provides:
//!
//! - [`HalResource`]: a parsed HAL document exposing properties, links and
//!   embedded resources, and flattening to a plain JSON object
//! - [`HalTransport`]: the seam between navigation and HTTP, with
//!   [`HalHttpClient`] as the `reqwest` implementation
//! - [`Navigator`]: link discovery and traversal from an API root, in the
//!   style of "discover, then follow relations"
//!
//! Every navigation returns a new [`Navigator`] positioned on the fetched
//! document together with its HTTP status. Error statuses are *not* turned
//! into errors here; callers decide how to interpret them. Only transport
//! failures, unresolvable links and success bodies that are not JSON are
//! errors.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use halbridge_api::{ClientConfig, HalHttpClient, Navigator};
//!
//! let transport = Arc::new(HalHttpClient::new(&ClientConfig::default())?);
//! let root = Navigator::discover(transport, "http://localhost:8080/api").await?;
//! let books = root.get("books", &Default::default()).await?;
//! println!("status: {}", books.status());
//! ```

mod error;
mod navigator;
mod resource;
mod transport;

pub use error::ApiError;
pub use navigator::Navigator;
pub use resource::{HalResource, Link, strip_uri_template};
pub use transport::{
    ClientConfig, DEFAULT_ACCEPT, DEFAULT_TIMEOUT, HalHttpClient, HalTransport, HttpRequest, HttpResponse, validate_root_url,
};
