use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use super::Company;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
pub struct Ranking {
    pub id: i64,
    pub company: String,
    pub score: Decimal,
    pub created_at: DateTime<Utc>,
}

/// A company paired with its most recent ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCompany {
    pub company: Company,
    pub ranking: Ranking,
}
