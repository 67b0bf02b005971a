//! Local preview server.
//!
//! `/` is rendered per request from the `category` and `q` query parameters,
//! so a shared link shows the same cards before any script runs. With a
//! controller build configured, `/pkg/*` serves it so the pages come alive.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Json},
    routing::get,
};
use ragdocs_web::assets::{features_page, viewer_page};
use ragdocs_web::controller::CONTROLLER_FILES;
use ragdocs_web::export::features_json;
use ragdocs_web::{CategoryFilter, Entry, FilterState, Site};
use serde::Deserialize;

pub struct DocServeConfig {
    pub host: String,
    pub port: u16,
    /// `wasm-bindgen --target web` output served under `/pkg`
    pub controller: Option<PathBuf>,
}

pub struct ServeState {
    site: Site,
    viewer_html: String,
    features_json: String,
    controller: Option<PathBuf>,
}

impl ServeState {
    /// Pre-render everything that does not depend on the request.
    pub fn new(site: Site, controller: Option<PathBuf>) -> serde_json::Result<Self> {
        Ok(Self {
            viewer_html: viewer_page(&site, None)?,
            features_json: features_json(&site.collection)?,
            site,
            controller,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    category: String,
    #[serde(default)]
    q: String,
}

impl FilterQuery {
    fn to_filter(&self, site: &Site) -> FilterState {
        FilterState::new(CategoryFilter::parse(&self.category, &site.collection), self.q.as_str())
    }
}

pub fn router(state: Arc<ServeState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/viewer", get(viewer_handler))
        .route("/viewer.html", get(viewer_handler))
        .route("/features.json", get(export_handler))
        .route("/api/search", get(search_handler))
        .route("/pkg/{file}", get(controller_handler))
        .with_state(state)
}

async fn index_handler(
    State(state): State<Arc<ServeState>>,
    Query(query): Query<FilterQuery>,
) -> Result<Html<String>, StatusCode> {
    let filter = query.to_filter(&state.site);
    features_page(&state.site, &filter, None).map(Html).map_err(|err| {
        tracing::error!("failed to render features page: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

async fn viewer_handler(State(state): State<Arc<ServeState>>) -> Html<String> {
    Html(state.viewer_html.clone())
}

async fn export_handler(State(state): State<Arc<ServeState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        state.features_json.clone(),
    )
}

async fn search_handler(
    State(state): State<Arc<ServeState>>,
    Query(query): Query<FilterQuery>,
) -> Json<Vec<Entry>> {
    let filter = query.to_filter(&state.site);
    Json(filter.apply(&state.site.collection).into_iter().cloned().collect())
}

async fn controller_handler(
    State(state): State<Arc<ServeState>>,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let dir = state.controller.as_ref().ok_or(StatusCode::NOT_FOUND)?;
    if !CONTROLLER_FILES.contains(&file.as_str()) {
        return Err(StatusCode::NOT_FOUND);
    }
    let bytes = tokio::fs::read(dir.join(&file)).await.map_err(|err| {
        tracing::warn!("failed to read controller file `{file}`: {err}");
        StatusCode::NOT_FOUND
    })?;
    let mime = if file.ends_with(".wasm") {
        "application/wasm"
    } else {
        "text/javascript"
    };
    Ok(([(header::CONTENT_TYPE, mime)], bytes))
}

pub async fn serve_docs(site: Site, config: DocServeConfig) -> std::io::Result<()> {
    if config.controller.is_none() {
        tracing::warn!("no controller build given; pages are served without interactivity");
    }
    let state = ServeState::new(site, config.controller).map_err(std::io::Error::other)?;
    let app = router(Arc::new(state));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("preview server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await
}
