//! Web server implementation

use crate::ansible::{self, Ansible};
use crate::inventory;
use crate::terraform::Terraform;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pgforge_common::types::{
    ApplyResponse, OutputLinesResponse, RawOutputResponse, StatusResponse,
};
use pgforge_common::{sanitize_lines, ClusterRequest, Result, ServiceConfig};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Shared handler state
pub struct AppState {
    cfg: ServiceConfig,
    /// Serializes every operation that writes shared files or invokes a
    /// tool. Terraform and Ansible are not safe to run concurrently against
    /// one project directory.
    ops_lock: Mutex<()>,
}

impl AppState {
    fn terraform(&self) -> Terraform {
        Terraform::new(self.cfg.terraform_bin(), self.cfg.terraform_dir.clone())
    }

    fn ansible(&self) -> Ansible {
        Ansible::new(
            self.cfg.ansible_playbook_bin(),
            self.cfg.playbook_path.clone(),
        )
    }
}

/// Build the application router
pub fn router(cfg: ServiceConfig) -> Router {
    let state = Arc::new(AppState {
        cfg,
        ops_lock: Mutex::new(()),
    });

    Router::new()
        .route("/health", get(health_handler))
        .route("/generate", post(generate_handler))
        .route("/init", post(init_handler))
        .route("/plan", post(plan_handler))
        .route("/apply", post(apply_handler))
        .route("/destroy", post(destroy_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind and serve until shutdown
pub async fn serve(addr: SocketAddr, cfg: ServiceConfig) -> anyhow::Result<()> {
    let app = router(cfg);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("pgforge listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

fn internal_error(detail: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": detail.into()})),
    )
        .into_response()
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

async fn generate_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClusterRequest>,
) -> Response {
    let _guard = state.ops_lock.lock().await;
    match state.terraform().write_variables(&req) {
        Ok(()) => Json(StatusResponse {
            status: "Configuration generated successfully.".to_string(),
        })
        .into_response(),
        Err(e) => {
            error!("configuration generation failed: {}", e);
            internal_error(format!("Error generating configuration: {}", e))
        }
    }
}

async fn init_handler(State(state): State<Arc<AppState>>) -> Response {
    let _guard = state.ops_lock.lock().await;
    terraform_step(
        state.terraform().init().await,
        "Terraform initialized successfully.",
    )
}

async fn plan_handler(State(state): State<Arc<AppState>>) -> Response {
    let _guard = state.ops_lock.lock().await;
    terraform_step(
        state.terraform().plan().await,
        "Terraform plan executed successfully.",
    )
}

/// Shared init/plan response shaping: sanitized stdout lines on success,
/// the tool's raw error stream on non-zero exit.
fn terraform_step(result: Result<crate::runner::CommandOutput>, status: &str) -> Response {
    match result {
        Ok(out) if out.success() => Json(OutputLinesResponse {
            status: status.to_string(),
            output: sanitize_lines(&out.stdout),
        })
        .into_response(),
        Ok(out) => {
            error!("terraform exited with code {}", out.code);
            internal_error(out.stderr)
        }
        Err(e) => {
            error!("terraform invocation failed: {}", e);
            internal_error(e.to_string())
        }
    }
}

async fn apply_handler(State(state): State<Arc<AppState>>) -> Response {
    let _guard = state.ops_lock.lock().await;
    match orchestrate_apply(&state).await {
        Ok(()) => Json(ApplyResponse {
            status: "Cluster applied successfully.".to_string(),
            message: "Infrastructure provisioned and hosts configured.".to_string(),
        })
        .into_response(),
        Err(e) => {
            error!("apply failed: {}", e);
            internal_error(e.to_string())
        }
    }
}

/// The orchestrated apply cycle: provision, read back outputs, configure.
///
/// There is no rollback between steps. A failed playbook run leaves the
/// infrastructure provisioned but unconfigured; the response reports the
/// failure and the caller decides whether to retry or destroy.
async fn orchestrate_apply(state: &AppState) -> Result<()> {
    let tf = state.terraform();

    // Step 1: provision.
    tf.apply().await?.require_success("terraform apply")?;

    // Step 2: read back outputs and build the configuration inputs.
    let private_key = tf.output_raw("ssh_private_key").await?;
    let primary = tf.output_raw("primary_public_ip").await?;
    let replicas = tf.output_json_list("replica_public_ips").await?;

    ansible::write_private_key(&state.cfg.private_key_path, &private_key)?;
    inventory::write(&state.cfg.inventory_path, &primary, &replicas)?;
    info!(
        "inventory rebuilt: primary {}, {} replica(s)",
        primary,
        replicas.len()
    );

    // Step 3: configure the hosts.
    let play_result = state
        .ansible()
        .run_playbook(&state.cfg.inventory_path, &state.cfg.private_key_path)
        .await
        .and_then(|out| out.require_success("ansible-playbook"));

    // Step 4: the key never outlives the apply cycle, success or not.
    if let Err(e) = ansible::remove_private_key(&state.cfg.private_key_path) {
        warn!("failed to remove private key file: {}", e);
    }

    play_result?;
    Ok(())
}

async fn destroy_handler(State(state): State<Arc<AppState>>) -> Response {
    let _guard = state.ops_lock.lock().await;
    match state.terraform().destroy().await {
        Ok(out) if out.success() => Json(RawOutputResponse {
            status: "Infrastructure destroyed successfully.".to_string(),
            output: out.stdout,
        })
        .into_response(),
        Ok(out) => {
            error!("terraform destroy exited with code {}", out.code);
            internal_error(out.stderr)
        }
        Err(e) => {
            error!("terraform destroy invocation failed: {}", e);
            internal_error(e.to_string())
        }
    }
}
