//! Employee service - CRUD operations over the employee store

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, Employee, EmployeeId, EmployeeInput, EmployeeRepository};

/// Employee service for CRUD operations
#[derive(Debug)]
pub struct EmployeeService<R: EmployeeRepository> {
    repository: Arc<R>,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Create a new EmployeeService backed by the given store
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Result<Vec<Employee>, DomainError> {
        self.repository.list().await
    }

    /// Get an employee by ID, returning an error if not found
    pub async fn get_required(&self, id: EmployeeId) -> Result<Employee, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, input: EmployeeInput) -> Result<Employee, DomainError> {
        let employee = self.repository.create(input).await?;
        info!(employee_id = %employee.id, "Employee created");
        Ok(employee)
    }

    pub async fn update(
        &self,
        id: EmployeeId,
        input: EmployeeInput,
    ) -> Result<Employee, DomainError> {
        let employee = self
            .repository
            .update(id, input)
            .await?
            .ok_or_else(|| not_found(id))?;

        info!(employee_id = %id, "Employee updated");
        Ok(employee)
    }

    pub async fn delete(&self, id: EmployeeId) -> Result<(), DomainError> {
        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }

        info!(employee_id = %id, "Employee deleted");
        Ok(())
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}

fn not_found(id: EmployeeId) -> DomainError {
    DomainError::not_found(format!("Employee '{}' not found", id))
}
