mod company;
mod dashboard;
mod financial;
mod ranking;
mod stock_price;

pub use company::*;
pub use dashboard::*;
pub use financial::*;
pub use ranking::*;
pub use stock_price::*;
