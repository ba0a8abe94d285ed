use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
pub struct Financial {
    pub id: i64,
    pub company: String,
    pub date: NaiveDate,
    pub revenue: Option<Decimal>,
    pub net_income: Option<Decimal>,
    pub total_assets: Option<Decimal>,
    pub total_liabilities: Option<Decimal>,
    pub earnings_per_share: Option<Decimal>,
}
