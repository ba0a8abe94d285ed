mod company;
mod docs;

pub use company::*;
pub use docs::{openapi, ApiDoc};

pub async fn health() -> &'static str {
    "OK"
}
