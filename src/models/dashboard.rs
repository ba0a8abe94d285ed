use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::{Classification, Company, Financial, RankedCompany, Ranking, StockPrice, Ticker};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RankSummary {
    pub score: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<&Ranking> for RankSummary {
    fn from(ranking: &Ranking) -> Self {
        Self {
            score: ranking.score,
            created_at: ranking.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CompanyRankEntry {
    pub company_id: String,
    pub name: String,
    pub sector: Option<Classification>,
    pub category: Option<Classification>,
    pub ticker_symbol: Option<String>,
    pub exchange_platform: Option<String>,
    pub current_ranking: RankSummary,
}

impl From<RankedCompany> for CompanyRankEntry {
    fn from(ranked: RankedCompany) -> Self {
        let RankedCompany { company, ranking } = ranked;
        let (ticker_symbol, exchange_platform) = match company.ticker {
            Some(ticker) => (Some(ticker.symbol), ticker.exchange_name),
            None => (None, None),
        };
        Self {
            company_id: company.company_id,
            name: company.name,
            sector: company.sector,
            category: company.category,
            ticker_symbol,
            exchange_platform,
            current_ranking: RankSummary::from(&ranking),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    pub market_cap: Option<Decimal>,
    #[serde(flatten)]
    pub entry: CompanyRankEntry,
}

impl From<RankedCompany> for LeaderboardEntry {
    fn from(ranked: RankedCompany) -> Self {
        Self {
            market_cap: ranked.company.market_cap,
            entry: CompanyRankEntry::from(ranked),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CompanyDetails {
    pub company_id: String,
    pub name: String,
    pub description: Option<String>,
    pub sector: Option<Classification>,
    pub category: Option<Classification>,
    pub ticker: Option<Ticker>,
}

impl From<Company> for CompanyDetails {
    fn from(company: Company) -> Self {
        Self {
            company_id: company.company_id,
            name: company.name,
            description: company.description,
            sector: company.sector,
            category: company.category,
            ticker: company.ticker,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CompanyInterval {
    #[serde(flatten)]
    pub company: CompanyDetails,
    pub current_ranking: Option<Ranking>,
    pub financials: Vec<Financial>,
    pub stock_prices: Vec<StockPrice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CompanySnapshot {
    #[serde(flatten)]
    pub company: CompanyDetails,
    pub current_ranking: Option<Ranking>,
    pub financials: Option<Financial>,
    pub stock_price: Option<StockPrice>,
}
