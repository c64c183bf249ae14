use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use search_core::{load_catalog, Document, FacetOption, FilterSelection, SearchEngine, DEFAULT_SUGGESTION_LIMIT};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

const MAX_SUGGESTION_LIMIT: usize = 50;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    /// Comma-separated facet ids.
    #[serde(default)]
    pub categories: String,
    #[serde(default)]
    pub durations: String,
    #[serde(default)]
    pub levels: String,
}

impl SearchParams {
    fn selection(&self) -> FilterSelection {
        FilterSelection::new()
            .with_categories(split_ids(&self.categories))
            .with_durations(split_ids(&self.durations))
            .with_levels(split_ids(&self.levels))
    }
}

fn split_ids(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}
fn default_limit() -> usize { DEFAULT_SUGGESTION_LIMIT }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<Document>,
}

#[derive(Serialize)]
pub struct SuggestResponse {
    pub query: String,
    pub suggestions: Vec<String>,
}

#[derive(Serialize)]
pub struct FacetsResponse {
    pub categories: Vec<FacetOption>,
    pub durations: Vec<FacetOption>,
    pub levels: Vec<FacetOption>,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
}

pub fn build_app(catalog_path: &str) -> Result<Router> {
    let documents = load_catalog(catalog_path)?;
    Ok(router(Arc::new(SearchEngine::new(documents))))
}

/// Routes over a shared engine.
///
/// The engine memoizes every distinct query string it tokenizes and every
/// token pair it measures, and never evicts. Behind a public listener that
/// memory grows with the number of distinct queries served, so long-running
/// deployments should restart or rebuild the engine periodically.
pub fn router(engine: Arc<SearchEngine>) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/suggest", get(suggest_handler))
        .route("/facets", get(facets_handler))
        .route("/courses/:id", get(course_handler))
        .with_state(AppState { engine })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let selection = params.selection();
    let results: Vec<Document> = state.engine.search(&params.q, &selection).into_iter().cloned().collect();
    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, hits = results.len(), took_s = elapsed.as_secs_f64(), "search");
    Json(SearchResponse { total_hits: results.len(), query: params.q, took_s: elapsed.as_secs_f64(), results })
}

pub async fn suggest_handler(State(state): State<AppState>, Query(params): Query<SuggestParams>) -> Json<SuggestResponse> {
    let limit = params.limit.clamp(1, MAX_SUGGESTION_LIMIT);
    let suggestions = state.engine.suggestions(&params.q, limit);
    Json(SuggestResponse { query: params.q, suggestions })
}

pub async fn facets_handler(State(state): State<AppState>) -> Json<FacetsResponse> {
    let engine = &state.engine;
    Json(FacetsResponse {
        categories: engine.categories().to_vec(),
        durations: engine.durations().to_vec(),
        levels: engine.levels().to_vec(),
    })
}

pub async fn course_handler(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Document>, (StatusCode, String)> {
    match state.engine.document(&id) {
        Some(doc) => Ok(Json(doc.clone())),
        None => Err((StatusCode::NOT_FOUND, format!("course {id} not found"))),
    }
}
