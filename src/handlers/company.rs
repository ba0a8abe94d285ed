use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppError,
    models::{CompanyInterval, CompanyRankEntry, CompanySnapshot, LeaderboardEntry, Ranking},
    state::AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct IntervalParams {
    /// First day included, `YYYY-MM-DD`.
    pub start_date: NaiveDate,
    /// Last day included, `YYYY-MM-DD`.
    pub end_date: NaiveDate,
}

#[utoipa::path(
    get,
    path = "/company/ranking",
    tag = "Company",
    responses(
        (status = 200, description = "Top ranked companies", body = [LeaderboardEntry])
    )
)]
pub async fn list_ranked_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let entries = state.companies.list_ranked_companies().await?;
    Ok(Json(entries))
}

#[utoipa::path(
    get,
    path = "/company/ranks/{category}",
    tag = "Company",
    params(("category" = String, Path, description = "Category id")),
    responses(
        (status = 200, description = "Top ranked companies in the category", body = [CompanyRankEntry])
    )
)]
pub async fn list_companies_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<CompanyRankEntry>>, AppError> {
    let entries = state.companies.list_companies_by_category(&category).await?;
    Ok(Json(entries))
}

#[utoipa::path(
    get,
    path = "/company/{company_id}/interval",
    tag = "Company",
    params(("company_id" = String, Path, description = "Company id"), IntervalParams),
    responses(
        (status = 200, description = "Company metrics within the interval", body = CompanyInterval),
        (status = 404, description = "Company info not available")
    )
)]
pub async fn get_company_interval(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    Query(params): Query<IntervalParams>,
) -> Result<Json<CompanyInterval>, AppError> {
    let interval = state
        .companies
        .get_company_interval(&company_id, params.start_date, params.end_date)
        .await?;
    Ok(Json(interval))
}

#[utoipa::path(
    get,
    path = "/company/{company_id}",
    tag = "Company",
    params(("company_id" = String, Path, description = "Company id")),
    responses(
        (status = 200, description = "Company snapshot", body = CompanySnapshot),
        (status = 404, description = "Company info not available")
    )
)]
pub async fn get_company_snapshot(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> Result<Json<CompanySnapshot>, AppError> {
    let snapshot = state.companies.get_company_snapshot(&company_id).await?;
    Ok(Json(snapshot))
}

#[utoipa::path(
    get,
    path = "/company/{company_id}/ranking/history",
    tag = "Company",
    params(("company_id" = String, Path, description = "Company id")),
    responses(
        (status = 200, description = "Every ranking of the company, newest first", body = [Ranking]),
        (status = 404, description = "Company info not available")
    )
)]
pub async fn get_company_ranking_history(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> Result<Json<Vec<Ranking>>, AppError> {
    let history = state
        .companies
        .get_company_ranking_history(&company_id)
        .await?;
    Ok(Json(history))
}
