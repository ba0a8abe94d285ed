//! Postgres-backed [`CompanyStore`].
//!
//! The schema is owned by the ingestion side. Tables read here:
//!
//! - `company(company_id text, name text, description text, market_cap numeric,
//!   sector text, category text, ticker text)`; the last three may be null
//! - `sector(sector_id, name)`, `category(category_id, name)`, `ticker(symbol, exchange_name)`
//! - `ranking(id bigint, company text, score numeric, created_at timestamp[tz])`
//! - `stock_price(id bigint, company text, date date, open, high, low, close numeric, volume bigint)`
//! - `financial(id bigint, company text, date date, revenue, net_income, total_assets,
//!   total_liabilities, earnings_per_share numeric)`
//!
//! `created_at` and `score` are cast on read, so `timestamp` and float columns
//! decode too. A naive `timestamp` is read as UTC, the session zone sqlx sets.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use super::{CategoryFilter, CompanyStore};
use crate::models::{
    Classification, Company, Financial, RankedCompany, Ranking, StockPrice, Ticker,
};

macro_rules! company_columns {
    () => {
        "c.company_id, c.name, c.description, c.market_cap::numeric AS market_cap, \
         c.sector AS sector_id, s.name AS sector_name, \
         c.category AS category_id, cat.name AS category_name, \
         c.ticker AS ticker_symbol, t.exchange_name"
    };
}

macro_rules! company_joins {
    () => {
        "LEFT JOIN sector s ON s.sector_id = c.sector \
         LEFT JOIN category cat ON cat.category_id = c.category \
         LEFT JOIN ticker t ON t.symbol = c.ticker"
    };
}

const FIND_COMPANY: &str = concat!(
    "SELECT ",
    company_columns!(),
    " FROM company c ",
    company_joins!(),
    " WHERE c.company_id = $1"
);

// One row per company: DISTINCT ON keeps the first row of each company
// group, which the ORDER BY makes the newest ranking.
const LATEST_RANKINGS: &str = concat!(
    "SELECT DISTINCT ON (c.company_id) ",
    company_columns!(),
    ", r.id AS ranking_id, r.score::numeric AS score, r.created_at::timestamptz AS created_at",
    " FROM company c JOIN ranking r ON r.company = c.company_id ",
    company_joins!(),
    " WHERE ($1::text IS NULL OR c.category = $1)",
    " AND ($2::text IS NULL OR c.category <> $2)",
    " ORDER BY c.company_id, r.created_at DESC, r.id DESC"
);

macro_rules! ranking_columns {
    () => {
        "id, company, score::numeric AS score, created_at::timestamptz AS created_at"
    };
}

const LATEST_RANKING: &str = concat!(
    "SELECT ",
    ranking_columns!(),
    " FROM ranking WHERE company = $1 ORDER BY created_at DESC, id DESC LIMIT 1"
);

const RANKING_HISTORY: &str = concat!(
    "SELECT ",
    ranking_columns!(),
    " FROM ranking WHERE company = $1 ORDER BY created_at DESC, id DESC"
);

const STOCK_PRICE_COLUMNS: &str = "id, company, date, open, high, low, close, volume";
const FINANCIAL_COLUMNS: &str =
    "id, company, date, revenue, net_income, total_assets, total_liabilities, earnings_per_share";

#[derive(Debug, FromRow)]
struct CompanyRow {
    company_id: String,
    name: String,
    description: Option<String>,
    market_cap: Option<Decimal>,
    sector_id: Option<String>,
    sector_name: Option<String>,
    category_id: Option<String>,
    category_name: Option<String>,
    ticker_symbol: Option<String>,
    exchange_name: Option<String>,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Self {
            company_id: row.company_id,
            name: row.name,
            description: row.description,
            market_cap: row.market_cap,
            sector: row.sector_id.map(|id| Classification {
                id,
                name: row.sector_name,
            }),
            category: row.category_id.map(|id| Classification {
                id,
                name: row.category_name,
            }),
            ticker: row.ticker_symbol.map(|symbol| Ticker {
                symbol,
                exchange_name: row.exchange_name,
            }),
        }
    }
}

#[derive(Debug, FromRow)]
struct RankedCompanyRow {
    #[sqlx(flatten)]
    company: CompanyRow,
    ranking_id: i64,
    score: Decimal,
    created_at: DateTime<Utc>,
}

impl From<RankedCompanyRow> for RankedCompany {
    fn from(row: RankedCompanyRow) -> Self {
        let company = Company::from(row.company);
        let ranking = Ranking {
            id: row.ranking_id,
            company: company.company_id.clone(),
            score: row.score,
            created_at: row.created_at,
        };
        Self { company, ranking }
    }
}

#[derive(Clone)]
pub struct PgCompanyStore {
    pool: PgPool,
}

impl PgCompanyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyStore for PgCompanyStore {
    async fn find_company(&self, company_id: &str) -> Result<Option<Company>, sqlx::Error> {
        let row: Option<CompanyRow> = sqlx::query_as(FIND_COMPANY)
            .bind(company_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Company::from))
    }

    async fn latest_rankings(
        &self,
        filter: CategoryFilter<'_>,
    ) -> Result<Vec<RankedCompany>, sqlx::Error> {
        let rows: Vec<RankedCompanyRow> = sqlx::query_as(LATEST_RANKINGS)
            .bind(filter.only())
            .bind(filter.excluded())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(RankedCompany::from).collect())
    }

    async fn latest_ranking(&self, company_id: &str) -> Result<Option<Ranking>, sqlx::Error> {
        sqlx::query_as(LATEST_RANKING)
            .bind(company_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn ranking_history(&self, company_id: &str) -> Result<Vec<Ranking>, sqlx::Error> {
        sqlx::query_as(RANKING_HISTORY)
            .bind(company_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn stock_prices_between(
        &self,
        company_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<StockPrice>, sqlx::Error> {
        let sql = format!(
            "SELECT {STOCK_PRICE_COLUMNS} FROM stock_price \
             WHERE company = $1 AND date >= $2 AND date <= $3 ORDER BY date ASC, id ASC"
        );
        sqlx::query_as(&sql)
            .bind(company_id)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
    }

    async fn financials_between(
        &self,
        company_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Financial>, sqlx::Error> {
        let sql = format!(
            "SELECT {FINANCIAL_COLUMNS} FROM financial \
             WHERE company = $1 AND date >= $2 AND date <= $3 ORDER BY date ASC, id ASC"
        );
        sqlx::query_as(&sql)
            .bind(company_id)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
    }

    async fn earliest_stock_price(
        &self,
        company_id: &str,
    ) -> Result<Option<StockPrice>, sqlx::Error> {
        let sql = format!(
            "SELECT {STOCK_PRICE_COLUMNS} FROM stock_price \
             WHERE company = $1 ORDER BY date ASC, id ASC LIMIT 1"
        );
        sqlx::query_as(&sql)
            .bind(company_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn earliest_financial(&self, company_id: &str) -> Result<Option<Financial>, sqlx::Error> {
        let sql = format!(
            "SELECT {FINANCIAL_COLUMNS} FROM financial \
             WHERE company = $1 ORDER BY date ASC, id ASC LIMIT 1"
        );
        sqlx::query_as(&sql)
            .bind(company_id)
            .fetch_optional(&self.pool)
            .await
    }
}
