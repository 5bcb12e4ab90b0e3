//! The dashboard presenter.
//!
//! A small axum server: one HTML page, a launch endpoint behind the page's
//! button, the static statistics as JSON, and a health probe. Launched game
//! handles are tracked so a second button press reports the running server
//! instead of spawning another, and so the child can be stopped on the way
//! out.

pub mod page;
pub mod stats;

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::launcher;
use crate::process::{ServiceHandle, UrlOpener};

/// Shared dashboard state.
#[derive(Debug)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Browser opener used by the launch action.
    pub opener: Arc<dyn UrlOpener>,
    /// The launched game server, if any.
    pub game: Mutex<Option<ServiceHandle>>,
}

/// State handle shared across request handlers.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Create dashboard state from configuration and a browser opener.
    #[must_use]
    pub fn new(config: Config, opener: Arc<dyn UrlOpener>) -> SharedState {
        Arc::new(Self {
            config,
            opener,
            game: Mutex::new(None),
        })
    }
}

/// Build the dashboard router.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/launch", post(launch_game))
        .route("/api/stats", get(get_stats))
        .route("/healthz", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the dashboard until interrupted.
///
/// On shutdown, a game server launched from the page is terminated exactly
/// once.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(config: Config, opener: Arc<dyn UrlOpener>) -> Result<()> {
    let addr = config.dashboard_addr();
    let state = AppState::new(config, opener);
    let app = router(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| Error::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!(%addr, "dashboard listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = state.game.lock().await.take() {
        handle.shutdown().await?;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(%err, "failed to listen for interrupt");
    }
}

/// `GET /` — the dashboard page.
async fn index(State(state): State<SharedState>) -> Html<String> {
    Html(page::render(&state.config))
}

/// `POST /api/launch` — start the game server and open its URL.
///
/// If a previously launched server is still running, reports it instead of
/// spawning a second one. A spawn failure is surfaced in the response body
/// and no browser tab is opened.
async fn launch_game(State(state): State<SharedState>) -> (StatusCode, Json<Value>) {
    let mut slot = state.game.lock().await;

    if let Some(handle) = slot.as_mut() {
        if handle.is_running().unwrap_or(false) {
            info!(url = %handle.url(), "game server already running");
            return (
                StatusCode::OK,
                Json(json!({ "status": "already_running", "url": handle.url() })),
            );
        }
    }

    match launcher::launch(&state.config, state.opener.as_ref()).await {
        Ok(handle) => {
            let url = handle.url().to_string();
            *slot = Some(handle);
            (
                StatusCode::OK,
                Json(json!({ "status": "launched", "url": url })),
            )
        }
        Err(err) => {
            error!(%err, "game server launch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "error", "message": err.to_string() })),
            )
        }
    }
}

/// `GET /api/stats` — the static statistics and chart series.
async fn get_stats() -> Json<Value> {
    Json(json!({
        "stats": stats::FlightStats::current(),
        "speed_series": stats::SPEED_SERIES,
    }))
}

/// `GET /healthz` — liveness probe.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::test_support::RecordingOpener;

    fn state_with(config: Config) -> SharedState {
        AppState::new(config, Arc::new(RecordingOpener::default()))
    }

    fn recording_state(config: Config) -> (SharedState, Arc<RecordingOpener>) {
        let opener = Arc::new(RecordingOpener::default());
        let state = AppState::new(config, Arc::clone(&opener) as Arc<dyn UrlOpener>);
        (state, opener)
    }

    #[tokio::test]
    async fn test_health_handler() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let Json(body) = get_stats().await;
        assert_eq!(body["stats"]["ammo"], 100);
        assert_eq!(body["stats"]["health"], "100%");
        assert_eq!(body["speed_series"][0], 10);
        assert_eq!(body["speed_series"][9], 100);
    }

    #[tokio::test]
    async fn test_index_handler_renders_page() {
        let state = state_with(Config::default());
        let Html(html) = index(State(state)).await;
        assert!(html.contains("Launch Flight Simulator"));
    }

    #[tokio::test]
    async fn test_launch_spawn_failure_reports_error_without_browser() {
        let mut config = Config::default();
        config.game.program = "hangar-test-no-such-program".to_string();
        config.game.startup_wait_ms = 0;
        let (state, opener) = recording_state(config);

        let (status, Json(body)) = launch_game(State(Arc::clone(&state))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("hangar-test-no-such-program"));
        assert!(opener.opened().is_empty());
        assert!(state.game.lock().await.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_launch_success_then_already_running() {
        let mut config = Config::default();
        config.game.program = "sleep".to_string();
        config.game.entry = "30".to_string();
        config.game.startup_wait_ms = 0;
        let (state, opener) = recording_state(config);

        let (status, Json(body)) = launch_game(State(Arc::clone(&state))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "launched");
        assert_eq!(body["url"], "http://localhost:3000");
        assert_eq!(opener.opened(), vec!["http://localhost:3000".to_string()]);

        // A second press reports the running server, no new spawn, no new tab.
        let (status, Json(body)) = launch_game(State(Arc::clone(&state))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "already_running");
        assert_eq!(opener.opened().len(), 1);

        // Take the handle out first so the guard drops before `state`.
        let handle = state.game.lock().await.take();
        if let Some(handle) = handle {
            handle.shutdown().await.unwrap();
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_launch_respawns_after_child_exit() {
        let mut config = Config::default();
        // `true` exits immediately, simulating a game server that died.
        config.game.program = "true".to_string();
        config.game.entry = "--".to_string();
        config.game.startup_wait_ms = 0;
        let (state, opener) = recording_state(config);

        let (status, _) = launch_game(State(Arc::clone(&state))).await;
        assert_eq!(status, StatusCode::OK);

        // Give the short-lived child time to exit, then launch again.
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        let (status, Json(body)) = launch_game(State(Arc::clone(&state))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "launched");
        assert_eq!(opener.opened().len(), 2);

        let handle = state.game.lock().await.take();
        if let Some(handle) = handle {
            handle.shutdown().await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_router_builds() {
        let state = state_with(Config::default());
        let _router = router(state);
    }
}
