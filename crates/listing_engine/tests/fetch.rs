use std::time::Duration;

use listing_engine::{
    FailureKind, FetchSettings, ListingFetcher, PageRequest, ReqwestListingFetcher,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer) -> FetchSettings {
    FetchSettings {
        api_base_url: format!("{}/api/ideas", server.uri()),
        ..FetchSettings::default()
    }
}

fn request(number: u32) -> PageRequest {
    PageRequest {
        number,
        size: 10,
        sort: "-published_at".to_string(),
    }
}

fn envelope() -> serde_json::Value {
    json!({
        "data": [
            {
                "id": 41,
                "title": "Kenali Tingkatan Influencers",
                "published_at": "2022-09-29 10:15:49",
                "small_image": [{"id": 1, "url": "https://cdn.example.com/s41.jpg"}],
                "medium_image": [{"id": 2, "url": "https://cdn.example.com/m41.jpg"}]
            },
            {
                "id": 42,
                "title": "Jangan Asal Pilih Influencer",
                "published_at": "2022-09-30 08:00:00",
                "small_image": [],
                "medium_image": []
            }
        ],
        "meta": {"current_page": 2, "last_page": 3, "per_page": 10, "total": 25}
    })
}

#[tokio::test]
async fn fetcher_sends_query_and_parses_envelope() {
    listing_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ideas"))
        .and(query_param("page[number]", "2"))
        .and(query_param("page[size]", "10"))
        .and(query_param("sort", "-published_at"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = ReqwestListingFetcher::new(settings(&server));
    let page = fetcher.fetch(&request(2)).await.expect("fetch ok");

    assert_eq!(page.total_items, 25);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].id, 41);
    assert_eq!(page.items[0].image_url(), Some("https://cdn.example.com/m41.jpg"));
    assert_eq!(page.items[1].image_url(), None);
}

#[tokio::test]
async fn request_url_carries_appended_image_fields() {
    let server = MockServer::start().await;
    let fetcher = ReqwestListingFetcher::new(settings(&server));
    let url = fetcher.request_url(&request(1)).unwrap();

    let appended: Vec<String> = url
        .query_pairs()
        .filter(|(key, _)| key == "append[]")
        .map(|(_, value)| value.into_owned())
        .collect();
    assert_eq!(appended, vec!["small_image", "medium_image"]);
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    listing_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ideas"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let fetcher = ReqwestListingFetcher::new(settings(&server));
    let err = fetcher.fetch(&request(1)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert_eq!(err.message, "HTTP error! status: 503");
}

#[tokio::test]
async fn fetcher_reports_schema_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ideas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let fetcher = ReqwestListingFetcher::new(settings(&server));
    let err = fetcher.fetch(&request(1)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Schema);
}

#[tokio::test]
async fn fetcher_rejects_non_json_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ideas"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&server)
        .await;

    let fetcher = ReqwestListingFetcher::new(settings(&server));
    let err = fetcher.fetch(&request(1)).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "text/html".to_string()
        }
    );
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ideas"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(envelope()),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..settings(&server)
    };
    let fetcher = ReqwestListingFetcher::new(settings);
    let err = fetcher.fetch(&request(1)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ideas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope()))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 16,
        ..settings(&server)
    };
    let fetcher = ReqwestListingFetcher::new(settings);
    let err = fetcher.fetch(&request(1)).await.unwrap_err();
    assert!(matches!(
        err.kind,
        FailureKind::TooLarge { max_bytes: 16, .. }
    ));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let settings = FetchSettings {
        api_base_url: "http://127.0.0.1:9/api/ideas".to_string(),
        connect_timeout: Duration::from_millis(200),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestListingFetcher::new(settings);
    let err = fetcher.fetch(&request(1)).await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::Network | FailureKind::Timeout));
    assert!(!err.message.is_empty());
}

#[tokio::test]
async fn invalid_base_url_is_reported() {
    let settings = FetchSettings {
        api_base_url: "not a url".to_string(),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestListingFetcher::new(settings);
    let err = fetcher.fetch(&request(1)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
