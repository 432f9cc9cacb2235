use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use clap::Parser;
use serde::Serialize;
use shared::{domain::MotorState, error::ProtocolError, protocol::DeviceCommand};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Stand-in for the motor controller: answers the panel's GET commands and
/// tracks what the motor would be doing.
#[derive(Parser, Debug)]
#[command(name = "device-sim")]
struct Args {
    #[arg(long, env = "DEVICE_SIM_BIND", default_value = "127.0.0.1:8080")]
    bind: String,
    /// Delay before answering each command, to mimic a slow link.
    #[arg(long, env = "DEVICE_SIM_LATENCY_MS", default_value_t = 0)]
    latency_ms: u64,
}

struct SimState {
    motor: Mutex<MotorState>,
    latency: Duration,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    powered: bool,
    speed: u8,
    direction: shared::domain::Direction,
    summary: String,
}

impl From<MotorState> for StatusResponse {
    fn from(state: MotorState) -> Self {
        Self {
            powered: state.powered,
            speed: state.speed,
            direction: state.direction,
            summary: state.to_string(),
        }
    }
}

fn build_router(state: Arc<SimState>) -> Router {
    Router::new()
        .route("/status", get(report_status))
        .fallback(handle_command)
        .with_state(state)
}

async fn report_status(State(state): State<Arc<SimState>>) -> Json<StatusResponse> {
    let motor = *state.motor.lock().await;
    Json(motor.into())
}

async fn handle_command(
    State(state): State<Arc<SimState>>,
    method: Method,
    uri: Uri,
) -> impl IntoResponse {
    if method != Method::GET {
        return (StatusCode::METHOD_NOT_ALLOWED, "commands are GET only".to_string());
    }
    if !state.latency.is_zero() {
        tokio::time::sleep(state.latency).await;
    }

    let path = uri.path();
    let command = match DeviceCommand::from_path(path) {
        Ok(command) => command,
        Err(err) => {
            warn!(%path, "rejected command: {err}");
            let status = match err {
                ProtocolError::UnknownPath(_) => StatusCode::NOT_FOUND,
                ProtocolError::InvalidSpeed(_) => StatusCode::BAD_REQUEST,
            };
            return (status, err.to_string());
        }
    };

    let mut motor = state.motor.lock().await;
    *motor = command
        .as_intents()
        .into_iter()
        .fold(*motor, MotorState::apply);
    info!(path = %command.path(), "{}", *motor);
    (StatusCode::OK, "OK".to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let state = Arc::new(SimState {
        motor: Mutex::new(MotorState::new()),
        latency: Duration::from_millis(args.latency_ms),
    });

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!("device simulator listening on {}", listener.local_addr()?);
    axum::serve(listener, build_router(state))
        .await
        .context("device simulator stopped")?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
