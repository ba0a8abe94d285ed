mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgCompanyStore;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{Company, Financial, RankedCompany, Ranking, StockPrice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter<'a> {
    Only(&'a str),
    Excluding(Option<&'a str>),
}

impl CategoryFilter<'_> {
    /// Mirrors the SQL predicate: a company without a category never
    /// matches a comparison against one.
    pub fn matches(&self, category_id: Option<&str>) -> bool {
        match (self, category_id) {
            (CategoryFilter::Excluding(None), _) => true,
            (_, None) => false,
            (CategoryFilter::Only(wanted), Some(id)) => id == *wanted,
            (CategoryFilter::Excluding(Some(excluded)), Some(id)) => id != *excluded,
        }
    }

    pub(crate) fn only(&self) -> Option<&str> {
        match self {
            CategoryFilter::Only(wanted) => Some(*wanted),
            CategoryFilter::Excluding(_) => None,
        }
    }

    pub(crate) fn excluded(&self) -> Option<&str> {
        match self {
            CategoryFilter::Only(_) => None,
            CategoryFilter::Excluding(excluded) => *excluded,
        }
    }
}

#[async_trait]
pub trait CompanyStore: Send + Sync {
    async fn find_company(&self, company_id: &str) -> Result<Option<Company>, sqlx::Error>;

    /// Ranked companies accepted by `filter`, ordered by `company_id`.
    /// Equal `created_at` goes to the greater ranking id.
    async fn latest_rankings(
        &self,
        filter: CategoryFilter<'_>,
    ) -> Result<Vec<RankedCompany>, sqlx::Error>;

    async fn latest_ranking(&self, company_id: &str) -> Result<Option<Ranking>, sqlx::Error>;

    /// All rankings of a company, newest first.
    async fn ranking_history(&self, company_id: &str) -> Result<Vec<Ranking>, sqlx::Error>;

    /// Rows dated within `[start, end]`, oldest first.
    async fn stock_prices_between(
        &self,
        company_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<StockPrice>, sqlx::Error>;

    async fn financials_between(
        &self,
        company_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Financial>, sqlx::Error>;

    async fn earliest_stock_price(&self, company_id: &str)
        -> Result<Option<StockPrice>, sqlx::Error>;

    async fn earliest_financial(&self, company_id: &str) -> Result<Option<Financial>, sqlx::Error>;
}
