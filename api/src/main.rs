mod error;
mod lexicon;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use lexicon::Lexicon;
use serde::{Deserialize, Serialize};
use shabda_lib::{normalize_term, FilterTag, LookupResponse};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

const DEFAULT_DB_PATH: &str = "/opt/shabda/data/lexicon.db";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const CACHE_CAPACITY: usize = 1000;

struct AppState {
    lexicon: Lexicon,
}

// === Request/Response types ===

#[derive(Deserialize)]
struct WordQuery {
    word: Option<String>,
    filter: Option<String>,
}

/// An absent or blank `filter` means no filter
fn parse_filter(raw: Option<&str>) -> Result<Option<FilterTag>, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<FilterTag>().map(Some).map_err(|e| e.to_string()),
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    entries: u64,
    cached_queries: usize,
}

// === Handlers ===

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let entries = state.lexicon.count().unwrap_or(0);
    let (cached_queries, _) = state.lexicon.cache_stats();
    Json(HealthResponse {
        status: "ok".to_string(),
        entries,
        cached_queries,
    })
}

async fn word(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WordQuery>,
) -> (StatusCode, Json<LookupResponse>) {
    let filter = match parse_filter(params.filter.as_deref()) {
        Ok(filter) => filter,
        Err(message) => {
            tracing::debug!(filter = ?params.filter, "rejected filter");
            return (StatusCode::BAD_REQUEST, Json(LookupResponse::failed(message)));
        }
    };

    let term = normalize_term(params.word.as_deref().unwrap_or(""));
    if term.is_empty() {
        return (StatusCode::OK, Json(LookupResponse::ok(Vec::new())));
    }

    let lookup_state = Arc::clone(&state);
    let lookup_term = term.clone();
    let result = tokio::task::spawn_blocking(move || {
        lookup_state.lexicon.lookup(&lookup_term, filter)
    })
    .await;

    match result {
        Ok(Ok(entries)) => {
            tracing::debug!(term = %term, filter = ?filter, count = entries.len(), "lookup");
            (StatusCode::OK, Json(LookupResponse::ok((*entries).clone())))
        }
        Ok(Err(e)) => {
            tracing::error!(term = %term, error = %e, "lookup failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(LookupResponse::failed(e.to_string())))
        }
        Err(e) => {
            tracing::error!(term = %term, error = %e, "lookup task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(LookupResponse::failed(format!("Task join error: {}", e))),
            )
        }
    }
}

fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/word", get(word))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shabda_api=info")),
        )
        .init();

    let db_path = std::env::var("SHABDA_LEXICON_DB")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH));
    let lexicon = Lexicon::open(&db_path, CACHE_CAPACITY)?;

    // `shabda-api import <entries.json>` seeds the lexicon and exits
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [command, file] = args.as_slice() {
        if command == "import" {
            let count = lexicon.import_json(Path::new(file))?;
            tracing::info!("Imported {} entries into {:?}", count, db_path);
            return Ok(());
        }
    }

    let state = Arc::new(AppState { lexicon });
    let addr = std::env::var("SHABDA_API_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, router(state)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_router(dir: &Path) -> Router {
        let lexicon = lexicon::tests::seeded(dir);
        router(Arc::new(AppState { lexicon }))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn word_returns_success_envelope() {
        let tmp = tempfile::tempdir().unwrap();
        let uri = "/word?word=%E0%A4%9C%E0%A5%8D%E0%A4%B5%E0%A4%B0"; // ज्वर
        let (status, body) = get_json(test_router(tmp.path()), uri).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["results"].as_array().unwrap().len(), 1);
        assert_eq!(body["results"][0]["word"], "ज्वर");
        assert_eq!(body["results"][0]["_id"], "3");
        assert!(body["results"][0].get("gender").is_none());
    }

    #[tokio::test]
    async fn word_applies_filter() {
        let tmp = tempfile::tempdir().unwrap();
        let (_, body) = get_json(test_router(tmp.path()), "/word?word=fig&filter=definition").await;
        assert_eq!(body["results"][0]["word"], "अश्वत्थ");

        let (_, body) = get_json(test_router(tmp.path()), "/word?word=fig&filter=headword").await;
        assert!(body["results"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_filter_is_failure_envelope() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, body) = get_json(test_router(tmp.path()), "/word?word=fig&filter=gender").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Unknown filter tag: gender");
    }

    #[tokio::test]
    async fn blank_and_alias_filters_are_accepted() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, body) = get_json(test_router(tmp.path()), "/word?word=fig&filter=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"][0]["word"], "अश्वत्थ");

        let uri = "/word?word=%E0%A4%9C%E0%A5%8D%E0%A4%B5%E0%A4%B0&filter=word"; // ज्वर
        let (status, body) = get_json(test_router(tmp.path()), uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"][0]["word"], "ज्वर");
    }

    #[tokio::test]
    async fn blank_word_is_empty_success() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, body) = get_json(test_router(tmp.path()), "/word?word=%20%20").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(body["results"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn client_fetcher_against_live_server() {
        use shabda_lib::{HttpLookupClient, SearchRequest, SuggestionFetcher};
        use std::time::Duration;

        let tmp = tempfile::tempdir().unwrap();
        let app = test_router(tmp.path());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });

        let client =
            HttpLookupClient::new(format!("http://{}", addr), Duration::from_secs(5)).unwrap();
        let fetcher = SuggestionFetcher::new(Arc::new(client));

        fetcher.fetch(&SearchRequest::new("अश्वगंधा", None)).await;
        let state = fetcher.snapshot();
        assert_eq!(state.entries.len(), 1);
        assert_eq!(state.entries[0].meaning.as_deref(), Some("असगंध"));

        fetcher
            .fetch(&SearchRequest::new("Charaka", Some(FilterTag::Reference)))
            .await;
        assert_eq!(fetcher.snapshot().entries[0].headword, "अश्वगंधा");
    }

    #[tokio::test]
    async fn health_reports_entry_count() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_router(tmp.path());
        let (status, body) = get_json(app.clone(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["entries"], 3);
        assert_eq!(body["cached_queries"], 0);

        get_json(app.clone(), "/word?word=fig").await;
        let (_, body) = get_json(app, "/health").await;
        assert_eq!(body["cached_queries"], 1);
    }
}
