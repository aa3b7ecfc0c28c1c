//! Employee repository trait

use async_trait::async_trait;

use super::{Employee, EmployeeId, EmployeeInput};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Store of employee records; owns id assignment
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// All records, ordered by id
    async fn list(&self) -> Result<Vec<Employee>, DomainError>;

    async fn get(&self, id: EmployeeId) -> Result<Option<Employee>, DomainError>;

    /// Insert a record under a freshly assigned id
    async fn create(&self, input: EmployeeInput) -> Result<Employee, DomainError>;

    /// Overwrite name and position; `None` if the id is unknown
    async fn update(
        &self,
        id: EmployeeId,
        input: EmployeeInput,
    ) -> Result<Option<Employee>, DomainError>;

    /// Returns true if a record was removed
    async fn delete(&self, id: EmployeeId) -> Result<bool, DomainError>;

    async fn count(&self) -> Result<usize, DomainError>;
}
