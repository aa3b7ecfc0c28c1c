//! Infrastructure services

mod employee_service;

pub use employee_service::EmployeeService;
