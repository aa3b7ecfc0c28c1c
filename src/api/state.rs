//! Application state for shared services

use std::sync::Arc;

use crate::api::middleware::ApiKeyGuard;
use crate::domain::{DomainError, Employee, EmployeeId, EmployeeInput, EmployeeRepository};
use crate::infrastructure::services::EmployeeService;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub employee_service: Arc<dyn EmployeeServiceTrait>,
    pub api_key_guard: Arc<ApiKeyGuard>,
}

/// Trait for employee service operations
#[async_trait::async_trait]
pub trait EmployeeServiceTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<Employee>, DomainError>;
    async fn get(&self, id: EmployeeId) -> Result<Employee, DomainError>;
    async fn create(&self, input: EmployeeInput) -> Result<Employee, DomainError>;
    async fn update(&self, id: EmployeeId, input: EmployeeInput) -> Result<Employee, DomainError>;
    async fn delete(&self, id: EmployeeId) -> Result<(), DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

#[async_trait::async_trait]
impl<R: EmployeeRepository + 'static> EmployeeServiceTrait for EmployeeService<R> {
    async fn list(&self) -> Result<Vec<Employee>, DomainError> {
        EmployeeService::list(self).await
    }

    async fn get(&self, id: EmployeeId) -> Result<Employee, DomainError> {
        EmployeeService::get_required(self, id).await
    }

    async fn create(&self, input: EmployeeInput) -> Result<Employee, DomainError> {
        EmployeeService::create(self, input).await
    }

    async fn update(&self, id: EmployeeId, input: EmployeeInput) -> Result<Employee, DomainError> {
        EmployeeService::update(self, id, input).await
    }

    async fn delete(&self, id: EmployeeId) -> Result<(), DomainError> {
        EmployeeService::delete(self, id).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        EmployeeService::count(self).await
    }
}

impl AppState {
    pub fn new(employee_service: Arc<dyn EmployeeServiceTrait>, api_key_guard: ApiKeyGuard) -> Self {
        Self {
            employee_service,
            api_key_guard: Arc::new(api_key_guard),
        }
    }
}
