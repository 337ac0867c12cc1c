use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::error;
use uuid::Uuid;

use campus_db::models::{AnswerRow, QuestionRow};
use campus_types::api::{
    AnswerResponse, Claims, CreateAnswerRequest, CreateQuestionRequest, QuestionSummary,
};

use crate::auth::AppState;
use crate::convert::{decode_string_list, parse_db_time, parse_db_uuid, split_tags};
use crate::error::ApiError;

pub async fn list_questions(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(fetch_questions(&state).await?))
}

pub async fn create_question(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tags = split_tags(&req.tags);
    let tags_json =
        serde_json::to_string(&tags).map_err(|e| anyhow::anyhow!("tag encoding failed: {}", e))?;

    let question_id = Uuid::new_v4();
    state.db.insert_question(
        &question_id.to_string(),
        &req.title,
        &req.description,
        &tags_json,
        &claims.sub.to_string(),
    )?;

    Ok((StatusCode::CREATED, Json(fetch_questions(&state).await?)))
}

pub async fn list_answers(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.db.question_exists(&question_id.to_string())? {
        return Err(ApiError::NotFound("question"));
    }

    Ok(Json(fetch_answers(&state, question_id).await?))
}

pub async fn create_answer(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateAnswerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.db.question_exists(&question_id.to_string())? {
        return Err(ApiError::NotFound("question"));
    }

    let answer_id = Uuid::new_v4();
    state.db.insert_answer(
        &answer_id.to_string(),
        &question_id.to_string(),
        &req.content,
        &claims.sub.to_string(),
    )?;

    Ok((
        StatusCode::CREATED,
        Json(fetch_answers(&state, question_id).await?),
    ))
}

/// The question list read: newest first, asker name and answer count
/// joined in. Mutations re-run it for the refetch.
async fn fetch_questions(state: &AppState) -> Result<Vec<QuestionSummary>, ApiError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_questions())
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(anyhow::anyhow!("list query aborted"))
        })??;

    Ok(rows.into_iter().map(question_summary).collect())
}

/// The dependent read: answers scoped by question, newest first.
async fn fetch_answers(
    state: &AppState,
    question_id: Uuid,
) -> Result<Vec<AnswerResponse>, ApiError> {
    let db = state.clone();
    let qid = question_id.to_string();
    let rows = tokio::task::spawn_blocking(move || db.db.list_answers(&qid))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(anyhow::anyhow!("list query aborted"))
        })??;

    Ok(rows.into_iter().map(answer_response).collect())
}

fn question_summary(row: QuestionRow) -> QuestionSummary {
    QuestionSummary {
        id: parse_db_uuid(&row.id, "question"),
        title: row.title,
        description: row.description,
        tags: decode_string_list(&row.tags, "question"),
        votes: row.votes,
        user_id: parse_db_uuid(&row.user_id, "question"),
        asker_name: row.asker_name,
        answer_count: row.answer_count,
        created_at: parse_db_time(&row.created_at, "question"),
    }
}

fn answer_response(row: AnswerRow) -> AnswerResponse {
    AnswerResponse {
        id: parse_db_uuid(&row.id, "answer"),
        question_id: parse_db_uuid(&row.question_id, "answer"),
        content: row.content,
        votes: row.votes,
        user_id: parse_db_uuid(&row.user_id, "answer"),
        author_name: row.author_name,
        created_at: parse_db_time(&row.created_at, "answer"),
    }
}
