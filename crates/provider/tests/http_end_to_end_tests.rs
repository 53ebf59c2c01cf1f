use halbridge_provider::{DataProvider, ProviderConfig, data_provider};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_root(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_links": {
                "books": { "href": format!("{}/api/books{{?page,size,sort}}", server.uri()), "templated": true }
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn books_list_over_http() {
    let server = MockServer::start().await;
    mount_root(&server).await;
    let book = |n: u32, title: &str| {
        json!({
            "title": title,
            "_links": { "self": { "href": format!("{}/api/books/{n}", server.uri()) } }
        })
    };
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .and(query_param("page", "0"))
        .and(query_param("size", "2"))
        .and(query_param("sort", "title,asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_embedded": { "books": [book(1, "Dune"), book(2, "Emma")] },
            "page": { "size": 2, "totalElements": 5, "totalPages": 3, "number": 0 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = data_provider(&format!("{}/api", server.uri()), ProviderConfig::default()).expect("build provider");
    let envelope = provider
        .execute_raw(
            "GET_LIST",
            "books",
            json!({
                "pagination": { "page": 1, "perPage": 2 },
                "sort": { "field": "title", "order": "ASC" },
                "filter": {}
            }),
        )
        .await
        .expect("list books");

    assert_eq!(envelope.total, Some(5));
    let ids: Vec<String> = envelope
        .records()
        .iter()
        .filter_map(|record| record["id"].as_str().map(str::to_string))
        .collect();
    assert_eq!(
        ids,
        vec![format!("{}/api/books/1", server.uri()), format!("{}/api/books/2", server.uri())]
    );
}

#[tokio::test]
async fn http_errors_become_uniform_errors_with_debug_enabled() {
    let server = MockServer::start().await;
    mount_root(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/books/9"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>Not Found</html>"))
        .mount(&server)
        .await;

    let config = ProviderConfig {
        debug: true,
        ..ProviderConfig::default()
    };
    let provider = data_provider(&format!("{}/api", server.uri()), config).expect("build provider");
    let error = provider
        .execute_raw("GET_ONE", "books", json!({ "id": format!("{}/api/books/9", server.uri()) }))
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(404));
    assert!(error.to_string().contains("404"), "{error}");
}
