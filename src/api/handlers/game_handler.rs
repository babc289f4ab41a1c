//! Game API Handlers
//!
//! HTTP handlers for the guessing loop: predict, feedback and adding questions.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::game_dto::*},
    error::AppError,
};

fn record_failure(state: &AppState, err: &AppError) {
    if matches!(err, AppError::Storage(_) | AppError::Io(_)) {
        state.observability.metrics.record_persistence_error();
    }
}

/// Predict the entity or ask the next question
///
/// POST /api/v1/predict
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Predicting with {} answers", request.answers.len());

    let round = state.guess_service.play_round(&request.answers).await;

    let response = match (round.prediction.entity, round.next_question) {
        (Some(entity), _) => PredictResponse {
            prediction: Some(entity),
            next_question: None,
            confidence: round.prediction.confidence,
            message: None,
        },
        (None, Some(question)) => PredictResponse {
            prediction: None,
            next_question: Some(question),
            confidence: round.prediction.confidence,
            message: None,
        },
        (None, None) => PredictResponse {
            prediction: None,
            next_question: None,
            confidence: 0.0,
            message: Some(GIVE_UP_MESSAGE.to_string()),
        },
    };

    state
        .observability
        .metrics
        .record_round(response.prediction.is_some(), response.next_question.is_some());

    Ok(Json(response))
}

/// List entities still consistent with the answers
///
/// POST /api/v1/candidates
pub async fn candidates(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<impl IntoResponse, AppError> {
    let candidates = state.guess_service.candidates(&request.answers).await;
    let total = candidates.len();

    Ok(Json(CandidatesResponse { candidates, total }))
}

/// Apply feedback on a guess
///
/// POST /api/v1/feedback
pub async fn feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!(
        "Feedback for {}: correct={} ({} answers)",
        request.entity,
        request.correct,
        request.answers.len()
    );

    let entity = request.entity.trim();
    if entity.is_empty() {
        return Err(AppError::Validation("Entity name cannot be empty".to_string()));
    }

    let outcome = state
        .guess_service
        .update_from_feedback(entity, &request.answers, request.correct)
        .await
        .inspect_err(|e| record_failure(&state, e))?;

    state.observability.metrics.record_feedback(request.correct);

    Ok(Json(FeedbackResponse::from(outcome)))
}

async fn add(
    state: &AppState,
    question: &str,
    categories: Vec<String>,
) -> Result<(StatusCode, Json<AddQuestionResponse>), AppError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AppError::Validation("Question cannot be empty".to_string()));
    }

    let added = state
        .guess_service
        .add_question_with_categories(question, categories)
        .await
        .inspect_err(|e| record_failure(state, e))?;

    if added {
        state.observability.metrics.record_question_added();
        Ok((
            StatusCode::CREATED,
            Json(AddQuestionResponse {
                status: "Question added".to_string(),
                added,
            }),
        ))
    } else {
        Ok((
            StatusCode::OK,
            Json(AddQuestionResponse {
                status: "Question already exists".to_string(),
                added,
            }),
        ))
    }
}

/// Add a question with optional categories
///
/// POST /api/v1/questions
pub async fn add_question(
    State(state): State<AppState>,
    Json(request): Json<AddQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Adding question: {}", request.question);

    let categories = request
        .categories
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    add(&state, &request.question, categories).await
}

/// Add a question passed as a query parameter
///
/// POST /api/v1/add-question?question=...
pub async fn add_question_by_query(
    State(state): State<AppState>,
    Query(params): Query<AddQuestionParams>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Adding question: {}", params.question);

    add(&state, &params.question, Vec::new()).await
}
