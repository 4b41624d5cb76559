//! Tests for the catalog client.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real catalog host.

use serde_json::json;
use tocata_catalog::{CatalogClient, CatalogConfig, CatalogError};
use tocata_core::{FetchError, PlaylistSource};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CatalogClient {
    CatalogClient::new(CatalogConfig::new(format!("{}/lists/index.json", server.uri())))
        .expect("valid config")
}

async fn mount_index(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/lists/index.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Rock": "rock.json",
            "Filmes": "/movies/filmes.json",
            "Bossa": format!("{}/bossa.json", server.uri()),
        })))
        .mount(server)
        .await;
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_valid_https_url() {
        let client = CatalogClient::new(CatalogConfig::new("https://example.com/index.json"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_empty_url_rejected() {
        match CatalogClient::new(CatalogConfig::new("  ")) {
            Err(CatalogError::InvalidUrl(msg)) => assert!(msg.contains("empty")),
            other => panic!("Expected InvalidUrl error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let result = CatalogClient::new(CatalogConfig::new("ftp://example.com/index.json"));
        assert!(matches!(result, Err(CatalogError::InvalidUrl(_))));
    }

    #[test]
    fn test_garbage_url_rejected() {
        let result = CatalogClient::new(CatalogConfig::new("not a url"));
        assert!(matches!(result, Err(CatalogError::InvalidUrl(_))));
    }
}

// =============================================================================
// Index Tests
// =============================================================================

mod index {
    use super::*;

    #[tokio::test]
    async fn test_index_preserves_document_order_and_resolves_urls() {
        let server = MockServer::start().await;
        mount_index(&server).await;

        let client = client_for(&server);
        let index = client.index().await.unwrap();

        assert_eq!(index.names(), vec!["Rock", "Filmes", "Bossa"]);
        assert_eq!(
            index.get("Rock").unwrap().url,
            format!("{}/lists/rock.json", server.uri())
        );
        assert_eq!(
            index.get("Filmes").unwrap().url,
            format!("{}/movies/filmes.json", server.uri())
        );
        assert_eq!(
            index.get("Bossa").unwrap().url,
            format!("{}/bossa.json", server.uri())
        );
    }

    #[tokio::test]
    async fn test_index_is_fetched_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lists/index.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Rock": "rock.json" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.index().await.unwrap();
        client.index().await.unwrap();
        assert_eq!(client.playlist_names().await.unwrap(), vec!["Rock"]);
    }

    #[tokio::test]
    async fn test_requests_are_cache_busted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lists/index.json"))
            .and(header("cache-control", "no-store"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.index().await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let has_timestamp = requests[0]
            .url
            .query_pairs()
            .any(|(k, v)| k == "t" && v.parse::<i64>().is_ok());
        assert!(has_timestamp, "missing t=<millis> query: {}", requests[0].url);
    }

    #[tokio::test]
    async fn test_index_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lists/index.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server);
        match client.index().await {
            Err(CatalogError::Status { status, .. }) => assert_eq!(status, 500),
            other => panic!("Expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_index_must_be_object() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lists/index.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["rock.json"])))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.playlist_names().await.unwrap_err();
        assert!(matches!(err, FetchError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_non_string_index_values_are_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lists/index.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Broken": 12,
                "Rock": "rock.json"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.playlist_names().await.unwrap(), vec!["Rock"]);
    }
}

// =============================================================================
// Playlist Tests
// =============================================================================

mod playlists {
    use super::*;

    #[tokio::test]
    async fn test_fetch_entries() {
        let server = MockServer::start().await;
        mount_index(&server).await;
        Mock::given(method("GET"))
            .and(path("/lists/rock.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "title": "Song", "artist": "Band", "url": "https://a/song.mp3" },
                "https://a/bare.mp3"
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let entries = client.fetch_entries("Rock").await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], json!("https://a/bare.mp3"));
    }

    #[tokio::test]
    async fn test_unknown_playlist() {
        let server = MockServer::start().await;
        mount_index(&server).await;

        let client = client_for(&server);
        let err = client.fetch_entries("Jazz").await.unwrap_err();
        assert_eq!(err, FetchError::UnknownPlaylist("Jazz".into()));
    }

    #[tokio::test]
    async fn test_playlist_status_error() {
        let server = MockServer::start().await;
        mount_index(&server).await;
        Mock::given(method("GET"))
            .and(path("/lists/rock.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        match client.fetch_entries("Rock").await {
            Err(FetchError::Status { status, url }) => {
                assert_eq!(status, 404);
                assert!(url.contains("/lists/rock.json"));
            }
            other => panic!("Expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_playlist_is_empty() {
        let server = MockServer::start().await;
        mount_index(&server).await;
        Mock::given(method("GET"))
            .and(path("/lists/rock.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{ oops"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/movies/filmes.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tracks": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.fetch_entries("Rock").await.unwrap().is_empty());
        assert!(client.fetch_entries("Filmes").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        // Nothing listens on the discard port locally.
        let client =
            CatalogClient::new(CatalogConfig::new("http://127.0.0.1:9/lists/index.json")).unwrap();
        let err = client.playlist_names().await.unwrap_err();
        assert!(matches!(err, FetchError::Unreachable { .. }));
    }
}
