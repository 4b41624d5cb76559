//! iTunes search backend and end-to-end resolution against a mock server.

use serde_json::json;
use std::sync::Arc;
use tocata_artwork::{
    ArtworkConfig, ArtworkError, CoverResolver, CoverSearch, ItunesSearch, MediaKind,
    SearchQuery, DEFAULT_FALLBACK_URL,
};
use tocata_core::Track;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn song_query(term: &str) -> SearchQuery {
    SearchQuery {
        term: term.to_string(),
        kind: MediaKind::Song,
        limit: 3,
    }
}

// =============================================================================
// Search Backend Tests
// =============================================================================

mod search_backend {
    use super::*;

    #[tokio::test]
    async fn test_query_parameters_and_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("term", "Tom Jobim Wave"))
            .and(query_param("limit", "3"))
            .and(query_param("entity", "song"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resultCount": 1,
                "results": [{
                    "trackName": "Wave",
                    "artistName": "Antonio Carlos Jobim",
                    "releaseDate": "1967-01-01T08:00:00Z",
                    "artworkUrl100": "https://is1.example.com/image/100x100bb.jpg"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let search = ItunesSearch::with_base_url(&server.uri()).unwrap();
        let candidates = search.search(&song_query("Tom Jobim Wave")).await.unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "Wave");
        assert_eq!(candidates[0].artist, "Antonio Carlos Jobim");
        assert_eq!(candidates[0].release_year.as_deref(), Some("1967"));
        assert_eq!(
            candidates[0].artwork_url.as_deref(),
            Some("https://is1.example.com/image/100x100bb.jpg")
        );
    }

    #[tokio::test]
    async fn test_missing_results_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "resultCount": 0 })))
            .mount(&server)
            .await;

        let search = ItunesSearch::with_base_url(&server.uri()).unwrap();
        let candidates = search.search(&song_query("nothing")).await.unwrap();
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let search = ItunesSearch::with_base_url(&server.uri()).unwrap();
        match search.search(&song_query("Wave")).await {
            Err(ArtworkError::Status(status)) => assert_eq!(status, 503),
            other => panic!("Expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let search = ItunesSearch::with_base_url(&server.uri()).unwrap();
        let result = search.search(&song_query("Wave")).await;
        assert!(matches!(result, Err(ArtworkError::Parse(_))));
    }
}

// =============================================================================
// Resolution Tests
// =============================================================================

mod resolution {
    use super::*;

    fn resolver_for(server: &MockServer) -> CoverResolver {
        let search = ItunesSearch::with_base_url(&server.uri()).unwrap();
        CoverResolver::new(Arc::new(search), ArtworkConfig::default())
    }

    #[tokio::test]
    async fn test_failed_attempt_moves_to_next() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("term", "Elis Regina Aguas de Marco"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("term", "Aguas de Marco"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{
                    "trackName": "Águas de Março",
                    "artistName": "Elis Regina & Tom Jobim",
                    "artworkUrl100": "https://img.example.com/a/100x100bb.jpg"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resolver = resolver_for(&server);
        let track = Track::new("Aguas de Marco", "Elis Regina", "https://a/aguas.mp3");

        assert_eq!(
            resolver.resolve(&track, "MPB").await,
            "https://img.example.com/a/300x300bb.jpg"
        );
    }

    #[tokio::test]
    async fn test_movie_entity_for_movie_playlists() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("entity", "movie"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{
                    "trackName": "Cidade de Deus",
                    "artistName": "Fernando Meirelles",
                    "artworkUrl100": "https://img.example.com/m/100x100bb.jpg"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resolver = resolver_for(&server);
        let track = Track::new("Cidade de Deus", "", "https://a/cidade.mp4");

        assert_eq!(
            resolver.resolve(&track, "Filmes Nacionais").await,
            "https://img.example.com/m/300x300bb.jpg"
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_falls_back() {
        // Nothing listens on the discard port locally.
        let search = ItunesSearch::with_base_url("http://127.0.0.1:9").unwrap();
        let resolver = CoverResolver::new(Arc::new(search), ArtworkConfig::default());
        let track = Track::new("Wave", "Tom Jobim", "https://a/wave.mp3");

        assert_eq!(resolver.resolve(&track, "Bossa").await, DEFAULT_FALLBACK_URL);
    }
}
