//! Direct content endpoints: no order, no payment, one generation per call.

use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use service_core::error::AppError;

use crate::dtos::{
    CompatibilityRequest, ContentResponse, HoroscopeRequest, NatalChartRequest, TarotRequest,
};
use crate::models::ContentRequest;
use crate::startup::AppState;

async fn respond(state: &AppState, request: ContentRequest) -> Json<ContentResponse> {
    let content = state.generator.generate(&request).await;
    Json(ContentResponse {
        success: true,
        content: content.text,
        source: content.source,
    })
}

pub async fn daily_horoscope(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<HoroscopeRequest>, AppError>,
) -> Result<Json<ContentResponse>, AppError> {
    tracing::info!(
        user_id = ?payload.user_id,
        zodiac_sign = ?payload.zodiac_sign,
        "Generating daily horoscope"
    );
    let request = ContentRequest::daily(payload.zodiac_sign.as_deref())?;
    Ok(respond(&state, request).await)
}

pub async fn weekly_horoscope(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<HoroscopeRequest>, AppError>,
) -> Result<Json<ContentResponse>, AppError> {
    tracing::info!(
        user_id = ?payload.user_id,
        zodiac_sign = ?payload.zodiac_sign,
        "Generating weekly horoscope"
    );
    let request = ContentRequest::weekly(payload.zodiac_sign.as_deref())?;
    Ok(respond(&state, request).await)
}

pub async fn compatibility(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CompatibilityRequest>, AppError>,
) -> Result<Json<ContentResponse>, AppError> {
    tracing::info!(
        user_id = ?payload.user_id,
        first_sign = ?payload.first_sign,
        second_sign = ?payload.second_sign,
        "Generating compatibility reading"
    );
    let request = ContentRequest::compatibility(
        payload.first_sign.as_deref(),
        payload.second_sign.as_deref(),
    )?;
    Ok(respond(&state, request).await)
}

pub async fn tarot_reading(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<TarotRequest>, AppError>,
) -> Result<Json<ContentResponse>, AppError> {
    tracing::info!(
        user_id = ?payload.user_id,
        spread_type = ?payload.spread_type,
        "Generating tarot reading"
    );
    let request = ContentRequest::tarot(payload.spread_type.as_deref())?;
    Ok(respond(&state, request).await)
}

pub async fn natal_chart(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<NatalChartRequest>, AppError>,
) -> Result<Json<ContentResponse>, AppError> {
    tracing::info!(user_id = ?payload.user_id, "Generating natal chart");
    let birth = payload.birth_data.as_ref();
    let request = ContentRequest::natal_chart(
        birth.and_then(|b| b.birth_date.as_deref()),
        birth.and_then(|b| b.birth_place.as_deref()),
    )?;
    Ok(respond(&state, request).await)
}
