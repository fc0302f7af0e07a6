mod config;
mod protocol;
mod service;

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pier_core::generators::PassError;
use pier_core::StructureParameters;
use serde_json::json;
use std::sync::{Arc, RwLock};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use config::{ServerConfig, ServerError};
use protocol::{format_error, update, Command};
use service::{GenerationPayload, ModelError, ValidationPayload};

// Application State
struct AppState {
    params: Arc<RwLock<StructureParameters>>,
    config: ServerConfig,
}

impl AppState {
    fn current_params(&self) -> StructureParameters {
        match self.params.read() {
            Ok(params) => params.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn replace_params(&self, params: StructureParameters) {
        match self.params.write() {
            Ok(mut current) => *current = params,
            Err(poisoned) => *poisoned.into_inner() = params,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env()?;
    let shared_state = Arc::new(AppState {
        params: Arc::new(RwLock::new(StructureParameters::default())),
        config,
    });

    let app = router(shared_state);

    info!("listening on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/defaults", get(defaults))
        .route("/validate", post(validate))
        .route("/generate", post(generate))
        .route("/export/step", post(export_step))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Failures of the HTTP endpoints.
#[derive(Debug)]
enum ApiError {
    Invalid(ValidationPayload),
    Failed(String),
    Disabled,
}

impl From<PassError> for ApiError {
    fn from(err: PassError) -> Self {
        match err {
            PassError::Invalid(result) => ApiError::Invalid(ValidationPayload::from(&result)),
            PassError::Generation(e) => ApiError::Failed(e.to_string()),
        }
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Pass(e) => e.into(),
            other => ApiError::Failed(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(payload) => (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response(),
            ApiError::Failed(message) => {
                warn!("Request failed: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Disabled => (StatusCode::NOT_FOUND, "STEP export is disabled").into_response(),
        }
    }
}

async fn root() -> &'static str {
    "Pier substructure backend"
}

async fn defaults() -> Json<StructureParameters> {
    Json(StructureParameters::default())
}

async fn validate(Json(params): Json<StructureParameters>) -> Json<ValidationPayload> {
    Json(service::validate(&params))
}

async fn generate(Json(params): Json<StructureParameters>) -> Result<Json<GenerationPayload>, ApiError> {
    Ok(Json(service::dry_run(&params)?))
}

async fn export_step(
    State(state): State<Arc<AppState>>,
    Json(params): Json<StructureParameters>,
) -> Result<Response, ApiError> {
    if !state.config.export_step {
        return Err(ApiError::Disabled);
    }
    let document = tokio::task::spawn_blocking(move || service::step_document(&params))
        .await
        .map_err(|e| ApiError::Failed(format!("export task failed: {}", e)))??;
    Ok(([(header::CONTENT_TYPE, "application/step")], document).into_response())
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let session = Uuid::new_v4();
    info!(%session, "Client connected");

    // Send the working parameter set first
    let initial = update("PARAMS", &state.current_params());
    if socket.send(Message::Text(initial)).await.is_err() {
        return;
    }

    while let Some(msg) = socket.recv().await {
        let msg = if let Ok(msg) = msg {
            msg
        } else {
            return;
        };

        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };
        info!(%session, "Received command: {}", text.split(':').next().unwrap_or_default());

        let replies = match Command::parse(&text) {
            Some(command) => run_command(&state, command).await,
            None => vec![format_error("UNKNOWN_COMMAND", &format!("Unknown command: {}", text), "warning")],
        };

        for reply in replies {
            if socket.send(Message::Text(reply)).await.is_err() {
                return;
            }
        }
    }

    info!(%session, "Client disconnected");
}

async fn run_command(state: &AppState, command: Command<'_>) -> Vec<String> {
    match command {
        Command::Params(json) => match serde_json::from_str::<StructureParameters>(json) {
            Ok(params) => {
                let payload = service::validate(&params);
                state.replace_params(params);
                vec![update("VALIDATION", &payload)]
            }
            Err(e) => {
                warn!("Failed to parse PARAMS command: {}", e);
                vec![format_error("PARAMS_INVALID", &format!("Could not read parameters: {}", e), "error")]
            }
        },
        Command::Validate => vec![update("VALIDATION", &service::validate(&state.current_params()))],
        Command::Generate => match service::dry_run(&state.current_params()) {
            Ok(payload) => {
                info!("Generation recorded {} calls", payload.calls.len());
                vec![update("GENERATION", &payload)]
            }
            Err(PassError::Invalid(result)) => vec![
                update("VALIDATION", &ValidationPayload::from(&result)),
                format_error("INVALID_PARAMETERS", &result.summary(), "warning"),
            ],
            Err(PassError::Generation(e)) => {
                warn!("Generation failed: {}", e);
                vec![format_error("GENERATION_FAILED", &format!("Generation failed: {}", e), "error")]
            }
        },
        Command::Preview => {
            let params = state.current_params();
            let validation = service::validate(&params);
            let mesh = tokio::task::spawn_blocking(move || service::preview_mesh(&params)).await;
            let mut replies = vec![update("VALIDATION", &validation)];
            match mesh {
                Ok(Ok(mesh)) => {
                    info!("Sent RENDER_UPDATE with {} triangles", mesh.triangles.len());
                    replies.push(update("RENDER", &mesh));
                }
                Ok(Err(e)) => replies.push(format_error("PREVIEW_FAILED", &format!("Preview failed: {}", e), "error")),
                Err(e) => replies.push(format_error("PREVIEW_FAILED", &format!("Preview task failed: {}", e), "error")),
            }
            replies
        }
    }
}
