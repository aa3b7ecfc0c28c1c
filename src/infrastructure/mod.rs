//! Infrastructure layer - Store implementations, services and logging

pub mod employee;
pub mod logging;
pub mod services;
