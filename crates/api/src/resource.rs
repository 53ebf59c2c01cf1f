//! HAL document model.

use serde_json::{Map, Value};

const LINKS_KEY: &str = "_links";
const EMBEDDED_KEY: &str = "_embedded";
const SELF_REL: &str = "self";

/// A link advertised under `_links`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub templated: bool,
}

impl Link {
    /// The href with any URI-template expressions removed, ready to request.
    pub fn target(&self) -> String {
        if self.templated || self.href.contains('{') {
            strip_uri_template(&self.href)
        } else {
            self.href.clone()
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        let link = match value {
            Value::Array(items) => items.first()?,
            other => other,
        };
        let href = link.get("href")?.as_str()?.to_string();
        let templated = link.get("templated").and_then(Value::as_bool).unwrap_or(false);
        Some(Self { href, templated })
    }
}

/// Remove RFC 6570 expressions such as `{?page,size,sort}` from an href.
///
/// Query parameters are supplied separately when the link is followed, so
/// template variables are dropped rather than expanded.
pub fn strip_uri_template(href: &str) -> String {
    let mut out = String::with_capacity(href.len());
    let mut depth = 0usize;
    for ch in href.chars() {
        match ch {
            '{' => depth += 1,
            '}' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out
}

/// A fetched HAL document.
///
/// Properties, links and embedded resources are kept apart. Reads of absent
/// names yield `None` or an empty list rather than failing, so callers can
/// tolerate partially shaped responses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HalResource {
    properties: Map<String, Value>,
    links: Map<String, Value>,
    embedded: Map<String, Value>,
}

impl HalResource {
    /// Build a resource from a decoded JSON body. Non-object bodies produce an
    /// empty resource.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut properties) = value else {
            return Self::default();
        };
        let links = match properties.remove(LINKS_KEY) {
            Some(Value::Object(links)) => links,
            _ => Map::new(),
        };
        let embedded = match properties.remove(EMBEDDED_KEY) {
            Some(Value::Object(embedded)) => embedded,
            _ => Map::new(),
        };
        Self {
            properties,
            links,
            embedded,
        }
    }

    /// Read a top-level property. `null` reads as absent.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name).filter(|value| !value.is_null())
    }

    /// Read the resources embedded under `name`, in server order.
    ///
    /// A single embedded object is returned as a one-element list.
    pub fn embedded(&self, name: &str) -> Vec<HalResource> {
        match self.embedded.get(name) {
            Some(Value::Array(items)) => items.iter().cloned().map(HalResource::from_value).collect(),
            Some(item @ Value::Object(_)) => vec![HalResource::from_value(item.clone())],
            _ => Vec::new(),
        }
    }

    pub fn link(&self, rel: &str) -> Option<Link> {
        self.links.get(rel).and_then(Link::from_value)
    }

    /// The href of the `self` link, when advertised.
    pub fn self_href(&self) -> Option<String> {
        self.link(SELF_REL).map(|link| link.href)
    }

    /// Flatten into a plain object: every property plus `_links` and
    /// `_embedded` as received.
    pub fn to_object(&self) -> Map<String, Value> {
        let mut object = self.properties.clone();
        if !self.links.is_empty() {
            object.insert(LINKS_KEY.into(), Value::Object(self.links.clone()));
        }
        if !self.embedded.is_empty() {
            object.insert(EMBEDDED_KEY.into(), Value::Object(self.embedded.clone()));
        }
        object
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.links.is_empty() && self.embedded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn book_page() -> HalResource {
        HalResource::from_value(json!({
            "_embedded": {
                "books": [
                    { "title": "Dune", "_links": { "self": { "href": "http://api.test/books/1" } } },
                    { "title": "Emma", "_links": { "self": { "href": "http://api.test/books/2" } } }
                ],
                "author": { "name": "Ada" }
            },
            "_links": {
                "self": { "href": "http://api.test/books{?page,size,sort}", "templated": true },
                "curies": [{ "href": "http://api.test/docs/{rel}", "name": "doc", "templated": true }]
            },
            "page": { "size": 2, "totalElements": 5, "totalPages": 3, "number": 0 },
            "note": null
        }))
    }

    #[test]
    fn properties_exclude_reserved_keys() {
        let resource = book_page();
        assert_eq!(resource.property("page").and_then(|page| page.get("totalElements")), Some(&json!(5)));
        assert!(resource.property("_links").is_none());
        assert!(resource.property("note").is_none());
        assert!(resource.property("missing").is_none());
    }

    #[test]
    fn embedded_collections_keep_server_order() {
        let resource = book_page();
        let titles: Vec<Value> = resource
            .embedded("books")
            .iter()
            .filter_map(|book| book.property("title").cloned())
            .collect();
        assert_eq!(titles, vec![json!("Dune"), json!("Emma")]);
        assert_eq!(resource.embedded("author").len(), 1);
        assert!(resource.embedded("publishers").is_empty());
    }

    #[test]
    fn templated_links_are_stripped_for_requests() {
        let link = book_page().link("self").unwrap();
        assert!(link.templated);
        assert_eq!(link.target(), "http://api.test/books");
    }

    #[test]
    fn link_arrays_use_the_first_entry() {
        let link = book_page().link("curies").unwrap();
        assert_eq!(link.href, "http://api.test/docs/{rel}");
    }

    #[test]
    fn to_object_includes_links_for_self_href() {
        let book = book_page().embedded("books").remove(0);
        let object = book.to_object();
        assert_eq!(object["_links"]["self"]["href"], json!("http://api.test/books/1"));
        assert_eq!(object["title"], json!("Dune"));
        assert!(object.get("_embedded").is_none());
    }

    #[test]
    fn non_object_bodies_are_empty_resources() {
        assert!(HalResource::from_value(json!([1, 2])).is_empty());
        assert!(HalResource::from_value(Value::Null).is_empty());
    }

    #[test]
    fn strip_uri_template_handles_path_expressions() {
        assert_eq!(strip_uri_template("http://api.test/users{/id}{?projection}"), "http://api.test/users");
        assert_eq!(strip_uri_template("http://api.test/plain"), "http://api.test/plain");
    }
}
