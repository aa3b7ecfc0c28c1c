//! Employee domain module

mod entity;
mod repository;

pub use entity::{default_employees, Employee, EmployeeId, EmployeeInput};
pub use repository::EmployeeRepository;

#[cfg(test)]
pub use repository::MockEmployeeRepository;
