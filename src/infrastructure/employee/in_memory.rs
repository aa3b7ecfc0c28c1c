//! In-memory employee store

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::{DomainError, Employee, EmployeeId, EmployeeInput, EmployeeRepository};

/// Thread-safe in-memory employee store
///
/// Ids come from a monotonic counter that starts one past the largest seeded
/// id, so deleted ids are never handed out again and an emptied store keeps
/// counting. Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryEmployeeRepository {
    state: RwLock<StoreState>,
}

#[derive(Debug)]
struct StoreState {
    employees: BTreeMap<EmployeeId, Employee>,
    /// `None` once `i32::MAX` has been assigned
    next_id: Option<EmployeeId>,
}

impl Default for InMemoryEmployeeRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEmployeeRepository {
    /// Creates an empty store whose first id is 1
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                employees: BTreeMap::new(),
                next_id: Some(EmployeeId::new(1)),
            }),
        }
    }

    /// Creates a store pre-populated with employees, keyed by their own ids
    pub fn with_employees(employees: Vec<Employee>) -> Self {
        let employees: BTreeMap<EmployeeId, Employee> =
            employees.into_iter().map(|e| (e.id, e)).collect();
        let next_id = match employees.keys().next_back() {
            Some(max) => max.next(),
            None => Some(EmployeeId::new(1)),
        };

        Self {
            state: RwLock::new(StoreState { employees, next_id }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, DomainError> {
        self.state
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, DomainError> {
        self.state
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn list(&self) -> Result<Vec<Employee>, DomainError> {
        Ok(self.read()?.employees.values().cloned().collect())
    }

    async fn get(&self, id: EmployeeId) -> Result<Option<Employee>, DomainError> {
        Ok(self.read()?.employees.get(&id).cloned())
    }

    async fn create(&self, input: EmployeeInput) -> Result<Employee, DomainError> {
        let mut state = self.write()?;
        let id = state
            .next_id
            .ok_or_else(|| DomainError::storage("Employee id space exhausted"))?;

        let employee = Employee::new(id, input.name, input.position);
        state.employees.insert(id, employee.clone());
        state.next_id = id.next();

        Ok(employee)
    }

    async fn update(
        &self,
        id: EmployeeId,
        input: EmployeeInput,
    ) -> Result<Option<Employee>, DomainError> {
        let mut state = self.write()?;

        Ok(state.employees.get_mut(&id).map(|employee| {
            employee.apply(input);
            employee.clone()
        }))
    }

    async fn delete(&self, id: EmployeeId) -> Result<bool, DomainError> {
        Ok(self.write()?.employees.remove(&id).is_some())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.read()?.employees.len())
    }
}
