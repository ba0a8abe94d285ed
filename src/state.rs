use std::sync::Arc;

use crate::service::CompanyService;

#[derive(Clone)]
pub struct AppState {
    pub companies: Arc<CompanyService>,
}

impl AppState {
    pub fn new(companies: CompanyService) -> Self {
        Self {
            companies: Arc::new(companies),
        }
    }
}
