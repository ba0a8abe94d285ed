use axum::Json;
use utoipa::OpenApi;

use super::company;
use crate::models::{
    Classification, CompanyDetails, CompanyInterval, CompanyRankEntry, CompanySnapshot, Financial,
    LeaderboardEntry, RankSummary, Ranking, StockPrice, Ticker,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        company::list_ranked_companies,
        company::list_companies_by_category,
        company::get_company_interval,
        company::get_company_snapshot,
        company::get_company_ranking_history,
    ),
    components(schemas(
        Classification,
        Ticker,
        RankSummary,
        CompanyRankEntry,
        LeaderboardEntry,
        CompanyDetails,
        CompanyInterval,
        CompanySnapshot,
        Ranking,
        StockPrice,
        Financial,
    )),
    tags((name = "Company", description = "Company rankings and metrics"))
)]
pub struct ApiDoc;

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
