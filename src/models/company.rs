use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Classification {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Ticker {
    pub symbol: String,
    pub exchange_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Company {
    pub company_id: String,
    pub name: String,
    pub description: Option<String>,
    pub market_cap: Option<Decimal>,
    pub sector: Option<Classification>,
    pub category: Option<Classification>,
    pub ticker: Option<Ticker>,
}

impl Company {
    pub fn category_id(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.id.as_str())
    }
}
