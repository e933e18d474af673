//! HTTP surface: liveness probe plus single and batch analysis

use std::sync::Arc;

use anyhow::Context;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Local, NaiveDate, Utc};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis;
use crate::error::ApiError;
use crate::models::{BatchRequest, BatchResponse, RiskAssessment, StatusResponse, StudentRecord};

pub const STATUS_MESSAGE: &str = "Student Risk API Running";

/// Which calendar `Generated_Date` is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DateZone {
    Local,
    Utc,
}

type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    clock: Clock,
}

impl AppState {
    pub fn new(zone: DateZone) -> Self {
        let clock: Clock = match zone {
            DateZone::Local => Arc::new(|| Local::now().date_naive()),
            DateZone::Utc => Arc::new(|| Utc::now().date_naive()),
        };
        Self { clock }
    }

    #[cfg(test)]
    pub fn fixed(date: NaiveDate) -> Self {
        Self {
            clock: Arc::new(move || date),
        }
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/analyze", post(analyze_student))
        .route("/analyze_batch", post(analyze_batch))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(host: &str, port: u16, state: AppState) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "student risk API listening");

    axum::serve(listener, create_router(Arc::new(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: STATUS_MESSAGE.to_string(),
    })
}

async fn analyze_student(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<StudentRecord>, JsonRejection>,
) -> Result<Json<RiskAssessment>, ApiError> {
    let Json(student) = payload?;
    let request_id = Uuid::new_v4();
    info!(%request_id, student_id = %student.student_id, "analyzing student");

    let assessment = analysis::assess(&student, state.today())?;
    Ok(Json(assessment))
}

async fn analyze_batch(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<BatchResponse>, ApiError> {
    let Json(batch) = payload?;
    let request_id = Uuid::new_v4();
    info!(%request_id, students = batch.students.len(), "analyzing batch");

    let results = analysis::assess_batch(&batch.students, state.today())?;
    Ok(Json(BatchResponse { results }))
}
