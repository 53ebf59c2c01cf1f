//! In-memory HAL server used by the provider tests.
//!
//! Items live in a URL-keyed store with GET/PUT/DELETE/POST semantics;
//! collection pages and other fixed documents are registered as exact routes.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use halbridge_api::{ApiError, HalTransport, HttpRequest, HttpResponse};
use halbridge_provider::HalDataProvider;
use reqwest::Method;
use serde_json::{Value, json};

pub const ROOT: &str = "http://hal.test/api";

#[derive(Default)]
pub struct FakeHal {
    routes: Mutex<HashMap<(Method, String), HttpResponse>>,
    items: Mutex<BTreeMap<String, Value>>,
    unreachable: Mutex<HashSet<String>>,
    next_id: Mutex<u32>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeHal {
    /// A server whose root advertises `books`, `authors` and `users`.
    pub fn new() -> Arc<Self> {
        let fake = Arc::new(Self {
            next_id: Mutex::new(100),
            ..Self::default()
        });
        fake.route(
            Method::GET,
            ROOT,
            200,
            json!({
                "_links": {
                    "self": { "href": ROOT },
                    "books": { "href": format!("{ROOT}/books{{?page,size,sort}}"), "templated": true },
                    "authors": { "href": "/api/authors" },
                    "users": { "href": format!("{ROOT}/users") }
                }
            }),
        );
        fake
    }

    pub fn provider(self: &Arc<Self>) -> HalDataProvider {
        HalDataProvider::new(ROOT, Arc::clone(self) as Arc<dyn HalTransport>)
    }

    /// Serve `body` with `status` for an exact method and URL (query included).
    pub fn route(&self, method: Method, url: &str, status: u16, body: Value) {
        let body = if body.is_null() { String::new() } else { body.to_string() };
        self.routes.lock().unwrap().insert(
            (method, url.to_string()),
            HttpResponse {
                status,
                location: None,
                content_type: None,
                body,
            },
        );
    }

    /// Store an item at `url`, adding its self link.
    pub fn add_item(&self, url: &str, properties: Value) -> Value {
        let document = with_self_link(properties, url);
        self.items.lock().unwrap().insert(url.to_string(), document.clone());
        document
    }

    pub fn item(&self, url: &str) -> Option<Value> {
        self.items.lock().unwrap().get(url).cloned()
    }

    pub fn make_unreachable(&self, url: &str) {
        self.unreachable.lock().unwrap().insert(url.to_string());
    }

    pub fn requests(&self) -> Vec<(Method, String)> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|request| (request.method.clone(), request.url.to_string()))
            .collect()
    }

    pub fn request_bodies(&self, method: Method) -> Vec<Value> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|request| request.method == method)
            .filter_map(|request| request.body.clone())
            .collect()
    }

    fn respond(&self, request: &HttpRequest) -> HttpResponse {
        let url = request.url.to_string();
        if let Some(response) = self.routes.lock().unwrap().get(&(request.method.clone(), url.clone())) {
            return response.clone();
        }

        let mut items = self.items.lock().unwrap();
        match request.method {
            Method::GET => match items.get(&url) {
                Some(document) => ok(200, document),
                None => not_found(&url),
            },
            Method::PUT => {
                if !items.contains_key(&url) {
                    return not_found(&url);
                }
                let document = with_self_link(request.body.clone().unwrap_or(Value::Null), &url);
                items.insert(url, document.clone());
                ok(200, &document)
            }
            Method::DELETE => match items.remove(&url) {
                Some(_) => HttpResponse {
                    status: 204,
                    location: None,
                    content_type: None,
                    body: String::new(),
                },
                None => not_found(&url),
            },
            Method::POST => {
                let mut next_id = self.next_id.lock().unwrap();
                *next_id += 1;
                let created = format!("{}/{}", url.trim_end_matches('/'), next_id);
                let document = with_self_link(request.body.clone().unwrap_or(Value::Null), &created);
                items.insert(created.clone(), document);
                HttpResponse {
                    status: 201,
                    location: Some(created),
                    content_type: None,
                    body: String::new(),
                }
            }
            _ => HttpResponse {
                status: 405,
                location: None,
                content_type: None,
                body: String::new(),
            },
        }
    }
}

#[async_trait]
impl HalTransport for FakeHal {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.unreachable.lock().unwrap().contains(request.url.as_str()) {
            return Err(ApiError::Transport(format!("connection refused: {}", request.url)));
        }
        Ok(self.respond(&request))
    }
}

pub fn with_self_link(properties: Value, url: &str) -> Value {
    let mut document = properties.as_object().cloned().unwrap_or_default();
    document.insert("_links".into(), json!({ "self": { "href": url } }));
    Value::Object(document)
}

fn ok(status: u16, document: &Value) -> HttpResponse {
    HttpResponse {
        status,
        location: None,
        content_type: None,
        body: document.to_string(),
    }
}

fn not_found(url: &str) -> HttpResponse {
    HttpResponse {
        status: 404,
        location: None,
        content_type: None,
        body: json!({ "errorContext": { "problem": format!("No resource at {url}") } }).to_string(),
    }
}
