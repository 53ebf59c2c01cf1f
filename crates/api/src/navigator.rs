//! Link discovery and traversal.

use std::{sync::Arc, time::Instant};

use halbridge_util::{QueryMap, append_query};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::{ApiError, HalResource, HalTransport, HttpRequest, HttpResponse, validate_root_url};

const CREATED: u16 = 201;
const PREVIEW_CHARS: usize = 120;

/// A position in the hypermedia graph: the document most recently fetched,
/// the URL it came from and the status it was served with.
///
/// Navigation methods borrow the current position and return a new one, so
/// a navigator can be followed several times (e.g. the API root for each id
/// of a batch fetch).
#[derive(Clone)]
pub struct Navigator {
    transport: Arc<dyn HalTransport>,
    url: Url,
    status: u16,
    location: Option<String>,
    resource: HalResource,
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("url", &self.url.as_str())
            .field("status", &self.status)
            .field("location", &self.location)
            .field("resource", &self.resource)
            .finish()
    }
}

impl Navigator {
    /// Fetch the API root and position a navigator on it.
    ///
    /// The root is validated before anything is sent. Whatever status the
    /// root answers with is kept on the returned navigator; checking it is up
    /// to the caller, as for every other navigation.
    ///
    /// # Arguments
    /// * `transport` - Carries every request made from this navigator and the
    ///   navigators derived from it
    /// * `root` - Absolute `http`/`https` URL of the API root
    ///
    /// # Errors
    /// [`ApiError::InvalidRoot`] for an unusable root, otherwise whatever the
    /// transport reports, or [`ApiError::Decode`] when the root answers a
    /// success status with a body that is not JSON.
    ///
    /// # Example
    /// ```no_run
    /// use std::sync::Arc;
    /// use halbridge_api::{ClientConfig, HalHttpClient, Navigator};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), halbridge_api::ApiError> {
    /// let transport = Arc::new(HalHttpClient::new(&ClientConfig::default())?);
    /// let root = Navigator::discover(transport, "http://localhost:8080/api").await?;
    /// let books = root.get("books", &Default::default()).await?;
    /// println!("books answered {}", books.status());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn discover(transport: Arc<dyn HalTransport>, root: &str) -> Result<Self, ApiError> {
        let url = validate_root_url(root)?;
        let request = HttpRequest {
            method: Method::GET,
            url,
            body: None,
        };
        Self::navigate(transport, request).await
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn resource(&self) -> &HalResource {
        &self.resource
    }

    /// The `Location` header of the response, set by servers after a create.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// The URL the current document was fetched from.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// GET the target of relation `rel` of the current document.
    pub async fn get(&self, rel: &str, query: &QueryMap) -> Result<Self, ApiError> {
        let mut url = self.resolve_rel(rel)?;
        append_query(&mut url, query);
        self.send(Method::GET, url, None).await
    }

    /// GET an explicit URL, resolved against the current document's URL.
    pub async fn get_url(&self, href: &str, query: &QueryMap) -> Result<Self, ApiError> {
        let mut url = self.resolve_href(href)?;
        append_query(&mut url, query);
        self.send(Method::GET, url, None).await
    }

    /// PUT `body` to an explicit URL.
    pub async fn put_url(&self, href: &str, body: &Value) -> Result<Self, ApiError> {
        let url = self.resolve_href(href)?;
        self.send(Method::PUT, url, Some(body.clone())).await
    }

    /// POST `body` to the target of relation `rel`.
    ///
    /// A `201 Created` answer without a body is followed to its `Location`
    /// so the created resource is returned; the location stays available
    /// through [`Navigator::location`].
    pub async fn post(&self, rel: &str, body: &Value) -> Result<Self, ApiError> {
        let url = self.resolve_rel(rel)?;
        let created = self.send(Method::POST, url, Some(body.clone())).await?;

        let Some(location) = created.location.clone() else {
            return Ok(created);
        };
        if created.status != CREATED || !created.resource.is_empty() {
            return Ok(created);
        }

        debug!(%location, "following location of created resource");
        let mut followed = created.get_url(&location, &QueryMap::new()).await?;
        if followed.status < 400 {
            followed.status = created.status;
        }
        followed.location = Some(location);
        Ok(followed)
    }

    /// DELETE the target of relation `rel` of the current document.
    pub async fn delete(&self, rel: &str) -> Result<Self, ApiError> {
        let url = self.resolve_rel(rel)?;
        self.send(Method::DELETE, url, None).await
    }

    fn resolve_rel(&self, rel: &str) -> Result<Url, ApiError> {
        let link = self.resource.link(rel).ok_or_else(|| ApiError::MissingLink {
            rel: rel.to_string(),
            url: self.url.to_string(),
        })?;
        self.resolve_href(&link.target())
    }

    fn resolve_href(&self, href: &str) -> Result<Url, ApiError> {
        self.url.join(href).map_err(|source| ApiError::InvalidUrl {
            href: href.to_string(),
            base: self.url.to_string(),
            source,
        })
    }

    async fn send(&self, method: Method, url: Url, body: Option<Value>) -> Result<Self, ApiError> {
        let request = HttpRequest { method, url, body };
        Self::navigate(Arc::clone(&self.transport), request).await
    }

    async fn navigate(transport: Arc<dyn HalTransport>, request: HttpRequest) -> Result<Self, ApiError> {
        let start = Instant::now();
        let method = request.method.clone();
        let url = request.url.clone();
        debug!(method = %method, url = %url, "navigation started");

        let response = transport.send(request).await?;
        let resource = decode_resource(&url, &response)?;

        if response.status >= 400 {
            warn!(
                method = %method,
                url = %url,
                status = response.status,
                duration_ms = start.elapsed().as_millis(),
                "navigation returned an error status"
            );
        } else {
            debug!(
                method = %method,
                url = %url,
                status = response.status,
                duration_ms = start.elapsed().as_millis(),
                "navigation completed"
            );
        }

        Ok(Self {
            transport,
            url,
            status: response.status,
            location: response.location,
            resource,
        })
    }
}

/// Decode a response body into a resource.
///
/// Empty bodies are empty resources. Error responses frequently carry HTML or
/// plain text, so for statuses of 400 and above an undecodable body is also
/// read as empty; for success statuses it is an error naming the URL and the
/// content type the server declared.
fn decode_resource(url: &Url, response: &HttpResponse) -> Result<HalResource, ApiError> {
    let body = response.body.trim();
    if body.is_empty() {
        return Ok(HalResource::default());
    }
    match serde_json::from_str::<Value>(body) {
        Ok(value) => Ok(HalResource::from_value(value)),
        Err(error) if response.status >= 400 => {
            debug!(%url, status = response.status, content_type = ?response.content_type, error = %error, "ignoring non-JSON error body");
            Ok(HalResource::default())
        }
        Err(source) => Err(ApiError::Decode {
            url: url.to_string(),
            status: response.status,
            content_type: response.content_type.clone().unwrap_or_else(|| "none".to_string()),
            preview: body_preview(body),
            source,
        }),
    }
}

/// First line-safe characters of a body for error messages.
fn body_preview(body: &str) -> String {
    let mut preview: String = body
        .chars()
        .take(PREVIEW_CHARS)
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect();
    if body.chars().nth(PREVIEW_CHARS).is_some() {
        preview.push_str("...");
    }
    preview
}
