//! Runs the Postgres store against a live database. Each test builds its
//! tables in a private schema; without `DATABASE_URL` the tests return early.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use company_dashboard::{
    service::CompanyService,
    store::{CategoryFilter, CompanyStore, PgCompanyStore},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};

static NEXT_SCHEMA: AtomicUsize = AtomicUsize::new(0);

const TABLES: &[&str] = &[
    "CREATE TABLE sector (sector_id text PRIMARY KEY, name text NOT NULL)",
    "CREATE TABLE category (category_id text PRIMARY KEY, name text NOT NULL)",
    "CREATE TABLE ticker (symbol text PRIMARY KEY, exchange_name text)",
    "CREATE TABLE company (
        company_id text PRIMARY KEY,
        name text NOT NULL,
        description text,
        market_cap numeric,
        sector text REFERENCES sector,
        category text REFERENCES category,
        ticker text REFERENCES ticker
    )",
    "CREATE TABLE ranking (
        id bigint PRIMARY KEY,
        company text NOT NULL REFERENCES company,
        score numeric NOT NULL,
        created_at timestamptz NOT NULL
    )",
    "CREATE TABLE stock_price (
        id bigint PRIMARY KEY,
        company text NOT NULL REFERENCES company,
        date date NOT NULL,
        open numeric, high numeric, low numeric, close numeric,
        volume bigint
    )",
    "CREATE TABLE financial (
        id bigint PRIMARY KEY,
        company text NOT NULL REFERENCES company,
        date date NOT NULL,
        revenue numeric, net_income numeric, total_assets numeric,
        total_liabilities numeric, earnings_per_share numeric
    )",
    "INSERT INTO sector VALUES ('tech', 'Technology')",
    "INSERT INTO category VALUES ('large', 'Large cap'), ('small-cap', 'Small cap')",
    "INSERT INTO ticker VALUES ('ACME', 'NYSE'), ('BETA', 'NASDAQ'), ('DUO', 'NYSE'), ('TINY', 'OTC')",
];

struct TestDb {
    pool: PgPool,
    schema: String,
}

impl TestDb {
    async fn connect() -> Option<Self> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL unset, skipping Postgres store test");
            return None;
        };
        let schema = format!(
            "company_dashboard_test_{}_{}",
            std::process::id(),
            NEXT_SCHEMA.fetch_add(1, Ordering::SeqCst)
        );
        let search_path = format!("SET search_path TO {schema}");
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .after_connect(move |conn, _meta| {
                let sql = search_path.clone();
                Box::pin(async move {
                    conn.execute(sql.as_str()).await?;
                    Ok(())
                })
            })
            .connect(&url)
            .await
            .unwrap();

        sqlx::query(&format!("CREATE SCHEMA {schema}"))
            .execute(&pool)
            .await
            .unwrap();
        for statement in TABLES {
            sqlx::query(statement).execute(&pool).await.unwrap();
        }
        Some(Self { pool, schema })
    }

    fn store(&self) -> PgCompanyStore {
        PgCompanyStore::new(self.pool.clone())
    }

    async fn company(&self, id: &str, sector: Option<&str>, category: Option<&str>, ticker: Option<&str>) {
        sqlx::query(
            "INSERT INTO company (company_id, name, description, market_cap, sector, category, ticker) \
             VALUES ($1, $2, NULL, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(format!("{id} Corp"))
        .bind(dec!(1000000))
        .bind(sector)
        .bind(category)
        .bind(ticker)
        .execute(&self.pool)
        .await
        .unwrap();
    }

    async fn ranking(&self, id: i64, company: &str, score: Decimal, created_at: DateTime<Utc>) {
        sqlx::query("INSERT INTO ranking (id, company, score, created_at) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(company)
            .bind(score)
            .bind(created_at)
            .execute(&self.pool)
            .await
            .unwrap();
    }

    async fn price(&self, id: i64, company: &str, date: NaiveDate) {
        sqlx::query("INSERT INTO stock_price (id, company, date, close, volume) VALUES ($1, $2, $3, $4, $5)")
            .bind(id)
            .bind(company)
            .bind(date)
            .bind(dec!(12.5))
            .bind(100_i64)
            .execute(&self.pool)
            .await
            .unwrap();
    }

    async fn financial(&self, id: i64, company: &str, date: NaiveDate) {
        sqlx::query("INSERT INTO financial (id, company, date, revenue) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(company)
            .bind(date)
            .bind(dec!(5000))
            .execute(&self.pool)
            .await
            .unwrap();
    }

    async fn drop_schema(self) {
        sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.schema))
            .execute(&self.pool)
            .await
            .unwrap();
        self.pool.close().await;
    }
}

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, 8, 0, 0).unwrap()
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

async fn seed_rankings(db: &TestDb) {
    db.company("ACME", Some("tech"), Some("large"), Some("ACME")).await;
    db.company("BETA", Some("tech"), Some("large"), Some("BETA")).await;
    db.company("DUO", Some("tech"), Some("large"), Some("DUO")).await;
    db.company("TINY", Some("tech"), Some("small-cap"), Some("TINY")).await;
    db.company("UNRANKED", Some("tech"), Some("large"), None).await;
    db.company("NOSECTOR", None, Some("large"), None).await;

    db.ranking(1, "ACME", dec!(10), at(1)).await;
    db.ranking(2, "ACME", dec!(20), at(2)).await;
    db.ranking(3, "BETA", dec!(1), at(1)).await;
    db.ranking(7, "DUO", dec!(3), at(3)).await;
    db.ranking(8, "DUO", dec!(4), at(3)).await;
    db.ranking(9, "TINY", dec!(500), at(1)).await;
    db.ranking(10, "NOSECTOR", dec!(2), at(4)).await;
}

fn ids_and_scores(ranked: &[company_dashboard::models::RankedCompany]) -> Vec<(String, i64, Decimal)> {
    ranked
        .iter()
        .map(|r| (r.company.company_id.clone(), r.ranking.id, r.ranking.score))
        .collect()
}

#[tokio::test]
async fn latest_rankings_take_newest_row_per_company() {
    let Some(db) = TestDb::connect().await else { return };
    seed_rankings(&db).await;
    let store = db.store();

    let ranked = store
        .latest_rankings(CategoryFilter::Excluding(Some("small-cap")))
        .await
        .unwrap();
    assert_eq!(
        ids_and_scores(&ranked),
        vec![
            ("ACME".to_string(), 2, dec!(20)),
            ("BETA".to_string(), 3, dec!(1)),
            ("DUO".to_string(), 8, dec!(4)),
            ("NOSECTOR".to_string(), 10, dec!(2)),
        ]
    );
    assert_eq!(ranked[0].ranking.created_at, at(2));

    let only_small = store
        .latest_rankings(CategoryFilter::Only("small-cap"))
        .await
        .unwrap();
    assert_eq!(ids_and_scores(&only_small), vec![("TINY".to_string(), 9, dec!(500))]);

    let everything = store
        .latest_rankings(CategoryFilter::Excluding(None))
        .await
        .unwrap();
    assert_eq!(everything.len(), 5);

    db.drop_schema().await;
}

#[tokio::test]
async fn company_with_null_sector_and_ticker_is_found() {
    let Some(db) = TestDb::connect().await else { return };
    seed_rankings(&db).await;
    let store = db.store();

    let company = store.find_company("NOSECTOR").await.unwrap().unwrap();
    assert!(company.sector.is_none());
    assert!(company.ticker.is_none());
    assert_eq!(company.category_id(), Some("large"));

    let acme = store.find_company("ACME").await.unwrap().unwrap();
    assert_eq!(acme.sector.unwrap().name.as_deref(), Some("Technology"));
    assert_eq!(acme.ticker.unwrap().exchange_name.as_deref(), Some("NYSE"));

    assert!(store.find_company("GHOST").await.unwrap().is_none());

    db.drop_schema().await;
}

#[tokio::test]
async fn service_reports_newest_ranking_over_postgres() {
    let Some(db) = TestDb::connect().await else { return };
    seed_rankings(&db).await;
    let service = CompanyService::new(Arc::new(db.store()), Some("small-cap".into()));

    let snapshot = service.get_company_snapshot("ACME").await.unwrap();
    assert_eq!(snapshot.current_ranking.unwrap().score, dec!(20));

    let leaderboard = service.list_ranked_companies().await.unwrap();
    let ids: Vec<&str> = leaderboard.iter().map(|e| e.entry.company_id.as_str()).collect();
    assert_eq!(ids, vec!["ACME", "DUO", "NOSECTOR", "BETA"]);

    db.drop_schema().await;
}

#[tokio::test]
async fn interval_bounds_are_inclusive_and_ordered() {
    let Some(db) = TestDb::connect().await else { return };
    db.company("ACME", Some("tech"), Some("large"), Some("ACME")).await;
    db.price(1, "ACME", date(3, 31)).await;
    db.price(2, "ACME", date(2, 1)).await;
    db.price(3, "ACME", date(1, 31)).await;
    db.price(4, "ACME", date(4, 1)).await;
    db.financial(1, "ACME", date(3, 31)).await;
    db.financial(2, "ACME", date(2, 1)).await;
    db.financial(3, "ACME", date(1, 1)).await;
    let store = db.store();

    let prices = store
        .stock_prices_between("ACME", date(2, 1), date(3, 31))
        .await
        .unwrap();
    let dates: Vec<NaiveDate> = prices.iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![date(2, 1), date(3, 31)]);
    assert_eq!(prices[0].close, Some(dec!(12.5)));

    let financials = store
        .financials_between("ACME", date(2, 1), date(3, 31))
        .await
        .unwrap();
    let dates: Vec<NaiveDate> = financials.iter().map(|f| f.date).collect();
    assert_eq!(dates, vec![date(2, 1), date(3, 31)]);

    assert_eq!(store.earliest_stock_price("ACME").await.unwrap().map(|p| p.id), Some(3));
    assert_eq!(store.earliest_financial("ACME").await.unwrap().map(|f| f.id), Some(3));

    db.drop_schema().await;
}

#[tokio::test]
async fn history_is_newest_first() {
    let Some(db) = TestDb::connect().await else { return };
    seed_rankings(&db).await;

    let history = db.store().ranking_history("ACME").await.unwrap();
    let scores: Vec<Decimal> = history.iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![dec!(20), dec!(10)]);

    db.drop_schema().await;
}

#[tokio::test]
async fn naive_timestamps_and_float_scores_decode() {
    let Some(db) = TestDb::connect().await else { return };
    seed_rankings(&db).await;
    sqlx::query(
        "ALTER TABLE ranking \
         ALTER COLUMN created_at TYPE timestamp USING created_at AT TIME ZONE 'UTC', \
         ALTER COLUMN score TYPE double precision",
    )
    .execute(&db.pool)
    .await
    .unwrap();
    let store = db.store();

    let latest = store.latest_ranking("ACME").await.unwrap().unwrap();
    assert_eq!(latest.created_at, at(2));
    assert_eq!(latest.score, dec!(20));

    let ranked = store
        .latest_rankings(CategoryFilter::Only("large"))
        .await
        .unwrap();
    assert_eq!(ranked[0].ranking.created_at, at(2));

    db.drop_schema().await;
}
