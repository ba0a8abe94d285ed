use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::AppError;
use crate::models::{
    Company, CompanyInterval, CompanyRankEntry, CompanySnapshot, LeaderboardEntry, RankedCompany,
    Ranking,
};
use crate::store::{CategoryFilter, CompanyStore};

pub const LEADERBOARD_SIZE: usize = 12;

pub struct CompanyService {
    store: Arc<dyn CompanyStore>,
    low_market_cap_category_id: Option<String>,
}

impl CompanyService {
    pub fn new(store: Arc<dyn CompanyStore>, low_market_cap_category_id: Option<String>) -> Self {
        Self {
            store,
            low_market_cap_category_id,
        }
    }

    pub async fn list_ranked_companies(&self) -> Result<Vec<LeaderboardEntry>, AppError> {
        let filter = CategoryFilter::Excluding(self.low_market_cap_category_id.as_deref());
        let ranked = self.store.latest_rankings(filter).await?;
        Ok(top_by_score(ranked)
            .into_iter()
            .map(LeaderboardEntry::from)
            .collect())
    }

    pub async fn list_companies_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<CompanyRankEntry>, AppError> {
        let ranked = self
            .store
            .latest_rankings(CategoryFilter::Only(category))
            .await?;
        Ok(top_by_score(ranked)
            .into_iter()
            .map(CompanyRankEntry::from)
            .collect())
    }

    pub async fn get_company_interval(
        &self,
        company_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<CompanyInterval, AppError> {
        let company = self.require_company(company_id).await?;

        let stock_prices = self
            .store
            .stock_prices_between(company_id, start_date, end_date)
            .await?;
        let financials = self
            .store
            .financials_between(company_id, start_date, end_date)
            .await?;
        let current_ranking = self.store.latest_ranking(company_id).await?;

        Ok(CompanyInterval {
            company: company.into(),
            current_ranking,
            financials,
            stock_prices,
        })
    }

    /// Company metadata with its current ranking and the earliest price
    /// and financial record on file.
    pub async fn get_company_snapshot(&self, company_id: &str) -> Result<CompanySnapshot, AppError> {
        let company = self.require_company(company_id).await?;

        let current_ranking = self.store.latest_ranking(company_id).await?;
        let stock_price = self.store.earliest_stock_price(company_id).await?;
        let financials = self.store.earliest_financial(company_id).await?;

        Ok(CompanySnapshot {
            company: company.into(),
            current_ranking,
            financials,
            stock_price,
        })
    }

    pub async fn get_company_ranking_history(
        &self,
        company_id: &str,
    ) -> Result<Vec<Ranking>, AppError> {
        self.require_company(company_id).await?;
        Ok(self.store.ranking_history(company_id).await?)
    }

    async fn require_company(&self, company_id: &str) -> Result<Company, AppError> {
        self.store
            .find_company(company_id)
            .await?
            .ok_or_else(|| AppError::CompanyNotFound(company_id.to_string()))
    }
}

/// Highest scores first, cut to [`LEADERBOARD_SIZE`]. The sort is stable,
/// so equal scores keep the store's order.
fn top_by_score(mut ranked: Vec<RankedCompany>) -> Vec<RankedCompany> {
    ranked.sort_by(|a, b| b.ranking.score.cmp(&a.ranking.score));
    ranked.truncate(LEADERBOARD_SIZE);
    ranked
}
