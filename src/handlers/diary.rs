use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::models::diary::{DiaryDateQuery, DiaryEntry, DiaryRangeQuery};
use crate::AppState;

// POST /create/diary?date=YYYY-MM-DD, body is the raw entry text
pub async fn create_diary(
    State(state): State<AppState>,
    Query(query): Query<DiaryDateQuery>,
    text: String,
) -> AppResult<StatusCode> {
    state.diary.create_diary(query.date, text).await?;
    Ok(StatusCode::OK)
}

pub async fn read_diary(
    State(state): State<AppState>,
    Query(query): Query<DiaryDateQuery>,
) -> AppResult<Json<Vec<DiaryEntry>>> {
    let entries = state.diary.read_diary(query.date).await?;
    Ok(Json(entries))
}

pub async fn read_diaries(
    State(state): State<AppState>,
    Query(query): Query<DiaryRangeQuery>,
) -> AppResult<Json<Vec<DiaryEntry>>> {
    let entries = state
        .diary
        .read_diaries(query.start_date, query.end_date)
        .await?;
    Ok(Json(entries))
}

pub async fn update_diary(
    State(state): State<AppState>,
    Query(query): Query<DiaryDateQuery>,
    text: String,
) -> AppResult<StatusCode> {
    state.diary.update_diary(query.date, text).await?;
    Ok(StatusCode::OK)
}

pub async fn delete_diary(
    State(state): State<AppState>,
    Query(query): Query<DiaryDateQuery>,
) -> AppResult<StatusCode> {
    state.diary.delete_diary(query.date).await?;
    Ok(StatusCode::OK)
}
