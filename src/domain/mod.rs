//! Domain layer - Core entities and the store contract

pub mod employee;
pub mod error;

pub use employee::{default_employees, Employee, EmployeeId, EmployeeInput, EmployeeRepository};
pub use error::DomainError;

#[cfg(test)]
pub use employee::MockEmployeeRepository;
