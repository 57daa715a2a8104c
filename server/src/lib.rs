use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use engine::aggregate::{DietPlan, DiseaseDetails, Medication};
use engine::analyze::{analyze, Analysis, AnalyzeError, RankedCandidate};
use engine::dataset::load_reference_table;
use engine::ReferenceTable;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Mandatory disclaimer, attached to every response, success or failure.
pub const DISCLAIMER: &str = "MEDICAL DISCLAIMER: This information is for clinical \
decision support only and is NOT a final medical diagnosis. Results are based on \
symptom matching and must never replace professional medical advice, diagnosis, or \
treatment. Always consult a qualified healthcare professional; in a medical \
emergency, call emergency services immediately. Self-diagnosis based on this tool \
may delay critical treatment, and the tool does not account for patient-specific \
factors, medical history, or comorbidities.";

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub symptoms: String,
}

/// One envelope shape for success and failure, so clients need a single
/// decoding path. On failure the collections are empty and `error` is set.
#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub received_symptoms: String,
    pub matched_symptoms: Vec<String>,
    pub diseases: Vec<RankedCandidate>,
    pub reasoning: String,
    pub description: String,
    pub medications: Vec<Medication>,
    pub precautions: Vec<String>,
    pub diet: DietPlan,
    pub disclaimer: &'static str,
}

#[derive(Clone)]
pub struct AppState {
    pub table: Arc<ReferenceTable>,
}

/// Load the reference table from `data_dir` and build the router around it.
pub fn build_app<P: AsRef<Path>>(data_dir: P) -> Result<Router> {
    let table = load_reference_table(data_dir.as_ref())?;
    Ok(build_app_with_table(Arc::new(table)))
}

/// Router over an already-built table. The table is read-only for the life
/// of the process; the `Arc` is the only thing cloned per request.
pub fn build_app_with_table(table: Arc<ReferenceTable>) -> Router {
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
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/analyze", post(analyze_handler))
        .route("/datasets", get(datasets_handler))
        .with_state(AppState { table })
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn analyze_handler(
    State(state): State<AppState>,
    payload: Option<Json<AnalyzeRequest>>,
) -> (StatusCode, Json<AnalyzeResponse>) {
    // a body that is not valid JSON still gets the full envelope + disclaimer
    let Some(Json(request)) = payload else {
        let mut response = failure_response("", AnalyzeError::EmptyInput);
        response.error = Some("No JSON data provided".to_string());
        return (StatusCode::BAD_REQUEST, Json(response));
    };
    match analyze(&request.symptoms, &state.table) {
        Ok(analysis) => {
            tracing::info!(
                matched = analysis.matched_symptoms.len(),
                candidates = analysis.candidates.len(),
                "analysis complete"
            );
            (StatusCode::OK, Json(success_response(analysis)))
        }
        Err(err) => {
            tracing::info!(%err, "analysis rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(failure_response(&request.symptoms, err)),
            )
        }
    }
}

/// Dataset status introspection: row counts per reference file plus the
/// derived table dimensions.
pub async fn datasets_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "diseases": state.table.num_diseases(),
        "vocabulary": state.table.vocabulary_len(),
        "rows": state.table.stats,
        "disclaimer": DISCLAIMER,
    }))
}

fn success_response(analysis: Analysis) -> AnalyzeResponse {
    let Analysis {
        received_symptoms,
        matched_symptoms,
        candidates,
        reasoning,
        details,
    } = analysis;
    let DiseaseDetails {
        description,
        medications,
        precautions,
        diet,
    } = details;
    AnalyzeResponse {
        success: true,
        error: None,
        received_symptoms,
        matched_symptoms,
        diseases: candidates,
        reasoning,
        description,
        medications,
        precautions,
        diet,
        disclaimer: DISCLAIMER,
    }
}

fn failure_response(received: &str, err: AnalyzeError) -> AnalyzeResponse {
    let (matched, reasoning, description) = match &err {
        AnalyzeError::EmptyInput => (
            Vec::new(),
            "Analysis requires at least one known symptom to proceed.".to_string(),
            "Unable to analyze - no input provided".to_string(),
        ),
        AnalyzeError::NoSymptomsRecognized { matched } => (
            matched.clone(),
            "Analysis requires at least one known symptom to proceed.".to_string(),
            "Unable to analyze - insufficient symptom data".to_string(),
        ),
        AnalyzeError::NoDiseaseMatch { matched } => (
            matched.clone(),
            "While symptoms were recognized, no disease associations exist in the database."
                .to_string(),
            "Analysis incomplete - no disease mapping available".to_string(),
        ),
    };
    AnalyzeResponse {
        success: false,
        error: Some(err.to_string()),
        received_symptoms: received.trim().to_string(),
        matched_symptoms: matched,
        diseases: Vec::new(),
        reasoning,
        description,
        medications: Vec::new(),
        precautions: Vec::new(),
        diet: DietPlan::default(),
        disclaimer: DISCLAIMER,
    }
}
