use askama::Template;
use axum::{
    extract::{Form, Query, State},
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use hyper::Server;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::apis::DirectoryClient;
use crate::app::PresentationService;
use crate::config::Config;
use crate::constants::DEFAULT_RADIUS;
use crate::error::{MeetupError, Result};
use crate::map::{MapFigure, MapStyle};
use crate::metrics;
use crate::templates::MeetupsTemplate;

#[derive(Clone)]
pub struct AppState {
    pub presenter: PresentationService,
    pub map_style: Arc<MapStyle>,
    pub default_location: String,
    pub radius: u32,
}

impl AppState {
    pub fn new(presenter: PresentationService, map_style: MapStyle, default_location: String) -> Self {
        Self {
            presenter,
            map_style: Arc::new(map_style),
            default_location,
            radius: DEFAULT_RADIUS,
        }
    }

    /// Wires the real directory client from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.require_api_key()?;
        if config.map.access_token.is_empty() {
            warn!("No map access token configured; base map tiles will not load");
        }

        let client = DirectoryClient::new(&config.directory)?;
        let presenter = PresentationService::new(Arc::new(client));
        Ok(Self::new(
            presenter,
            MapStyle::from(&config.map),
            config.server.default_location.clone(),
        ))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    pub zipcode: Option<String>,
}

impl SearchForm {
    fn location<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.zipcode.as_deref().map(str::trim) {
            Some(zipcode) if !zipcode.is_empty() => zipcode,
            _ => fallback,
        }
    }
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "meetup-map",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn metrics_text() -> Response {
    match metrics::render() {
        Some(text) => text.into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "metrics not initialized").into_response(),
    }
}

async fn index(State(state): State<AppState>, Query(form): Query<SearchForm>) -> Response {
    let location = form.location(&state.default_location);
    render_search(&state, location).await
}

async fn search(State(state): State<AppState>, Form(form): Form<SearchForm>) -> Response {
    let location = form.location(&state.default_location);
    render_search(&state, location).await
}

/// Runs the search and renders the page. Search failures become a notice on
/// the page, never a failed request.
async fn render_search(state: &AppState, location: &str) -> Response {
    let (status, page, outcome) = match state.presenter.find_and_project(location, state.radius).await {
        Ok(projection) => {
            let figure = MapFigure::new(&projection, &state.map_style);
            debug!("Drawing {} markers near {}", figure.trace_count(), location);
            match figure.to_embedded_json() {
                Ok(figure_json) => (
                    StatusCode::OK,
                    MeetupsTemplate::with_map(location, figure_json, projection.markers),
                    "map",
                ),
                Err(e) => {
                    error!("Failed to serialize map figure: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        MeetupsTemplate::with_notice(location, "The map could not be drawn."),
                        "error",
                    )
                }
            }
        }
        Err(MeetupError::EmptyCatalog) => {
            info!("No groups near {}", location);
            (
                StatusCode::OK,
                MeetupsTemplate::with_notice(location, format!("No groups found near {location}.")),
                "empty",
            )
        }
        Err(e) if e.is_unavailable() => {
            warn!("Directory search for {} failed: {}", location, e);
            (
                StatusCode::BAD_GATEWAY,
                MeetupsTemplate::with_notice(location, "The meetup service is unavailable, try again."),
                "unavailable",
            )
        }
        Err(e) => {
            error!("Search for {} failed: {}", location, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                MeetupsTemplate::with_notice(location, "Something went wrong, try again."),
                "error",
            )
        }
    };

    metrics::page::rendered(outcome);
    match page.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("Template rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template rendering failed").into_response()
        }
    }
}

/// Create the HTTP router with the search page, health and metrics routes
pub fn create_server(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(index).post(search))
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// Start the HTTP server on the specified port
pub async fn start_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = create_server(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("HTTP server running on http://localhost:{port}");
    info!("Health check: http://localhost:{port}/health");

    Server::bind(&addr).serve(app.into_make_service()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_zipcode_falls_back() {
        let form = SearchForm {
            zipcode: Some("   ".to_string()),
        };
        assert_eq!(form.location("98105"), "98105");
        assert_eq!(SearchForm::default().location("98105"), "98105");
    }

    #[test]
    fn test_zipcode_trimmed() {
        let form = SearchForm {
            zipcode: Some(" 95125 ".to_string()),
        };
        assert_eq!(form.location("98105"), "95125");
    }
}
