use async_trait::async_trait;
use chrono::NaiveDate;

use super::{CategoryFilter, CompanyStore};
use crate::models::{Company, Financial, RankedCompany, Ranking, StockPrice};

/// A [`CompanyStore`] over rows held in memory.
///
/// Ordering guarantees match [`super::PgCompanyStore`], so the service
/// behaves the same over either store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    companies: Vec<Company>,
    rankings: Vec<Ranking>,
    stock_prices: Vec<StockPrice>,
    financials: Vec<Financial>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_company(mut self, company: Company) -> Self {
        self.companies.push(company);
        self
    }

    pub fn with_ranking(mut self, ranking: Ranking) -> Self {
        self.rankings.push(ranking);
        self
    }

    pub fn with_stock_price(mut self, price: StockPrice) -> Self {
        self.stock_prices.push(price);
        self
    }

    pub fn with_financial(mut self, financial: Financial) -> Self {
        self.financials.push(financial);
        self
    }

    fn newest_ranking(&self, company_id: &str) -> Option<&Ranking> {
        self.rankings
            .iter()
            .filter(|r| r.company == company_id)
            .max_by_key(|r| (r.created_at, r.id))
    }
}

#[async_trait]
impl CompanyStore for MemoryStore {
    async fn find_company(&self, company_id: &str) -> Result<Option<Company>, sqlx::Error> {
        Ok(self
            .companies
            .iter()
            .find(|c| c.company_id == company_id)
            .cloned())
    }

    async fn latest_rankings(
        &self,
        filter: CategoryFilter<'_>,
    ) -> Result<Vec<RankedCompany>, sqlx::Error> {
        let mut ranked: Vec<RankedCompany> = self
            .companies
            .iter()
            .filter(|c| filter.matches(c.category_id()))
            .filter_map(|c| {
                self.newest_ranking(&c.company_id).map(|r| RankedCompany {
                    company: c.clone(),
                    ranking: r.clone(),
                })
            })
            .collect();
        ranked.sort_by(|a, b| a.company.company_id.cmp(&b.company.company_id));
        Ok(ranked)
    }

    async fn latest_ranking(&self, company_id: &str) -> Result<Option<Ranking>, sqlx::Error> {
        Ok(self.newest_ranking(company_id).cloned())
    }

    async fn ranking_history(&self, company_id: &str) -> Result<Vec<Ranking>, sqlx::Error> {
        let mut history: Vec<Ranking> = self
            .rankings
            .iter()
            .filter(|r| r.company == company_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(history)
    }

    async fn stock_prices_between(
        &self,
        company_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<StockPrice>, sqlx::Error> {
        let mut prices: Vec<StockPrice> = self
            .stock_prices
            .iter()
            .filter(|p| p.company == company_id && p.date >= start && p.date <= end)
            .cloned()
            .collect();
        prices.sort_by_key(|p| (p.date, p.id));
        Ok(prices)
    }

    async fn financials_between(
        &self,
        company_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Financial>, sqlx::Error> {
        let mut financials: Vec<Financial> = self
            .financials
            .iter()
            .filter(|f| f.company == company_id && f.date >= start && f.date <= end)
            .cloned()
            .collect();
        financials.sort_by_key(|f| (f.date, f.id));
        Ok(financials)
    }

    async fn earliest_stock_price(
        &self,
        company_id: &str,
    ) -> Result<Option<StockPrice>, sqlx::Error> {
        Ok(self
            .stock_prices
            .iter()
            .filter(|p| p.company == company_id)
            .min_by_key(|p| (p.date, p.id))
            .cloned())
    }

    async fn earliest_financial(&self, company_id: &str) -> Result<Option<Financial>, sqlx::Error> {
        Ok(self
            .financials
            .iter()
            .filter(|f| f.company == company_id)
            .min_by_key(|f| (f.date, f.id))
            .cloned())
    }
}
