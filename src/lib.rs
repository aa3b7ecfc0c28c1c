//! Employee Directory API
//!
//! CRUD over an in-memory employee store, with request logging and a static
//! API key required on mutating requests.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::middleware::ApiKeyGuard;
use api::state::AppState;
use domain::default_employees;
use infrastructure::{employee::InMemoryEmployeeRepository, services::EmployeeService};
use tracing::info;

/// Create the application state from configuration
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let repository = if config.store.seed {
        InMemoryEmployeeRepository::with_employees(default_employees())
    } else {
        InMemoryEmployeeRepository::new()
    };

    info!(seeded = config.store.seed, "Employee store initialized");

    let employee_service = EmployeeService::new(Arc::new(repository));
    let api_key_guard = ApiKeyGuard::from_config(&config.auth)?;

    Ok(AppState::new(Arc::new(employee_service), api_key_guard))
}
