mod cache;
mod config;
mod metrics;
mod retry;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use annotate::AnnotateClient;
use extract::{Extractor, SentenceRelations};

use crate::cache::{CacheStats, ResultCache};
use crate::config::AppConfig;
use crate::metrics::{Metrics, MetricsSnapshot, Timer};
use crate::retry::RetryPolicy;

struct AppState {
    client: AnnotateClient,
    extractor: Extractor,
    cache: ResultCache,
    cache_enabled: bool,
    retry: RetryPolicy,
    metrics: Arc<Metrics>,
}

#[derive(Deserialize)]
struct ExtractRequest {
    text: String,
}

#[derive(Serialize)]
struct ExtractResponse {
    sentences: Vec<SentenceRelations>,
}

#[derive(Serialize)]
struct HealthResponse {
    parser: String,
}

#[derive(Serialize)]
struct StatsResponse {
    metrics: MetricsSnapshot,
    cache: CacheStats,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let app_config = match std::env::var("APP_CONFIG") {
        Ok(path) => AppConfig::from_file(&path).expect("Failed to load config file"),
        Err(_) => AppConfig::default(),
    };

    let client = AnnotateClient::new(
        app_config.parser.endpoint.clone(),
        app_config.parser.annotators.clone(),
        Duration::from_secs(app_config.parser.timeout_secs),
    );

    // Load the parser's models before accepting traffic
    if let Err(error) = client.warm_up().await {
        tracing::warn!(error = %error, "Parser warm-up failed, continuing anyway");
    }

    let state = Arc::new(AppState {
        extractor: Extractor::new(app_config.extraction.clone()),
        cache: ResultCache::new(app_config.cache.max_entries),
        cache_enabled: app_config.cache.enabled,
        retry: RetryPolicy::from_config(&app_config.retry),
        metrics: Metrics::new(),
        client,
    });

    // Build router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/extract", post(extract_text))
        .route("/stats", get(get_stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();

    tracing::info!("Server listening on http://localhost:3000");

    axum::serve(listener, app).await.unwrap();
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    // The CoreNLP server answers plain GETs on its root
    let parser = match reqwest::get(state.client.base_url()).await {
        Ok(resp) if resp.status().is_success() => "ok".to_string(),
        Ok(resp) => format!("error: status {}", resp.status()),
        Err(e) => format!("error: {}", e),
    };

    Json(HealthResponse { parser })
}

async fn extract_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, StatusCode> {
    if state.cache_enabled {
        if let Some(sentences) = state.cache.get(&req.text) {
            state.metrics.record_cache_hit();
            state.metrics.record_request(true);
            return Ok(Json(ExtractResponse { sentences }));
        }
    }

    // Parse through the external service, with retries
    let annotate_timer = Timer::start();
    let annotated = state
        .retry
        .run("annotate", || state.client.annotate(&req.text))
        .await
        .map_err(|error| {
            tracing::error!(error = %error, "Annotation failed");
            state.metrics.record_request(false);
            StatusCode::BAD_GATEWAY
        })?;
    state.metrics.record_annotate(annotate_timer.elapsed());

    // Run the extraction pipeline per sentence
    let extract_timer = Timer::start();
    let sentences = state.extractor.process_document(&annotated);
    let relation_count = sentences.iter().map(|s| s.relations.len()).sum();
    state
        .metrics
        .record_extract(extract_timer.elapsed(), sentences.len(), relation_count);

    if state.cache_enabled {
        state.cache.set(&req.text, sentences.clone());
    }
    state.metrics.record_request(true);

    Ok(Json(ExtractResponse { sentences }))
}

async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    Json(StatsResponse {
        metrics: state.metrics.snapshot(),
        cache: state.cache.stats(),
    })
}
