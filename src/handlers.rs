use crate::analysis::{analyze, product_catalog};
use crate::config::Config;
use crate::errors::{AppError, ResultExt};
use crate::intake::{validate_intake, AGE_DEFAULT, AGE_MAX, AGE_MIN, LEVEL_DEFAULT, LEVEL_MAX, LEVEL_MIN};
use crate::models::*;
use crate::report::render_report;
use crate::session::{session_not_found, SessionStore, StoredAnalysis, View};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use bigdecimal::BigDecimal;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Current-result state per visitor session.
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let sessions = SessionStore::new(
            Duration::from_secs(config.session_ttl_secs),
            config.session_max_capacity,
        );
        Self { config, sessions }
    }
}

// ============ Response Models ============

#[derive(Debug, Serialize)]
pub struct SliderBounds {
    pub min: u8,
    pub max: u8,
    pub default: u8,
}

/// Everything the questionnaire needs to draw its widgets.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub symptoms: Vec<Symptom>,
    pub genders: Vec<Gender>,
    pub diets: Vec<Diet>,
    pub exercise: Vec<Exercise>,
    pub levels: SliderBounds,
    pub age: SliderBounds,
    pub products: Vec<Product>,
}

/// The session's current view.
#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum AssessmentView {
    Intake { session_id: Uuid },
    Results(StoredAnalysis),
}

/// Offer for the paid follow-up test. No payment happens here.
#[derive(Debug, Serialize)]
pub struct BookingOffer {
    pub session_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: BigDecimal,
    pub booking_url: String,
    pub message: String,
}

/// Health check endpoint.
///
/// Returns the service status, version, and health information.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "health-advisor-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /api/v1/catalog
///
/// Lists the questionnaire options and the product catalog.
pub async fn get_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        symptoms: Symptom::ALL.to_vec(),
        genders: Gender::ALL.to_vec(),
        diets: Diet::ALL.to_vec(),
        exercise: Exercise::ALL.to_vec(),
        levels: SliderBounds {
            min: LEVEL_MIN,
            max: LEVEL_MAX,
            default: LEVEL_DEFAULT,
        },
        age: SliderBounds {
            min: AGE_MIN,
            max: AGE_MAX,
            default: AGE_DEFAULT,
        },
        products: product_catalog(),
    })
}

/// POST /api/v1/assessments
///
/// Validates a questionnaire submission, runs the analysis and stores it in
/// a new session.
///
/// # Returns
///
/// * `201 Created` with the stored analysis, `400` when the body is not a
///   decodable questionnaire, or `422` listing the fields that need attention.
pub async fn submit_assessment(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<IntakeForm>, JsonRejection>,
) -> Result<(StatusCode, Json<StoredAnalysis>), AppError> {
    tracing::info!("POST /assessments");

    let Json(form) = payload?;
    let intake = validate_intake(form).map_err(AppError::Validation)?;
    let session_id = state.sessions.open().await?;
    let stored = store_analysis(&state, session_id, &intake).await?;

    Ok((StatusCode::CREATED, Json(stored)))
}

/// POST /api/v1/assessments/:id
///
/// Retakes the assessment within an existing session, replacing its result.
/// Unknown or expired sessions answer `404`; they are never recreated.
pub async fn resubmit_assessment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    payload: Result<Json<IntakeForm>, JsonRejection>,
) -> Result<Json<StoredAnalysis>, AppError> {
    tracing::info!("POST /assessments/{}", id);

    let Json(form) = payload?;
    let intake = validate_intake(form).map_err(AppError::Validation)?;
    let stored = store_analysis(&state, id, &intake).await?;

    Ok(Json(stored))
}

async fn store_analysis(
    state: &AppState,
    session_id: Uuid,
    intake: &Intake,
) -> Result<StoredAnalysis, AppError> {
    let analysis = analyze(intake);
    let stored = StoredAnalysis::new(session_id, intake, analysis);

    state
        .sessions
        .set_result(session_id, stored.clone())
        .await
        .context("Storing analysis")?;

    tracing::info!(
        "Assessment stored for session {}: score={}, fingerprint={}",
        session_id,
        stored.analysis.overall_score,
        &stored.fingerprint[..12]
    );

    Ok(stored)
}

/// GET /api/v1/assessments/:id
///
/// Returns the results view, or the intake view after a reset.
pub async fn get_assessment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssessmentView>, AppError> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| session_not_found(id))?;

    let view = match session.view() {
        View::Results(stored) => AssessmentView::Results(stored.clone()),
        View::Intake => AssessmentView::Intake { session_id: id },
    };

    Ok(Json(view))
}

/// DELETE /api/v1/assessments/:id
///
/// "Take Assessment Again": discards the stored result.
pub async fn reset_assessment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    tracing::info!("DELETE /assessments/{}", id);

    if state.sessions.clear(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(id))
    }
}

/// GET /api/v1/assessments/:id/report
///
/// Plain-text rendering of the stored analysis.
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let stored = current_result(&state, id).await?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_report(&stored.analysis),
    ))
}

/// GET /api/v1/assessments/:id/booking
///
/// Booking offer for the bio-energetic follow-up test. Only available once
/// the session holds a result.
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingOffer>, AppError> {
    let stored = current_result(&state, id).await?;
    tracing::info!("Booking offer requested for session {}", stored.session_id);

    Ok(Json(BookingOffer {
        session_id: id,
        title: "Book Bio-Energetic Test".to_string(),
        description: "Bio-energetic testing provides a complete scan of your body's needs."
            .to_string(),
        price: state.config.booking_price.clone(),
        booking_url: state.config.booking_url.clone(),
        message: "Redirecting to booking...".to_string(),
    }))
}

async fn current_result(state: &AppState, id: Uuid) -> Result<StoredAnalysis, AppError> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| session_not_found(id))?;

    session.current().cloned().ok_or_else(|| {
        AppError::Conflict(format!(
            "Session {} has no analysis; complete the assessment first",
            id
        ))
    })
}
