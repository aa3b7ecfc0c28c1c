//! Employee entity and related types

use serde::Serialize;

/// Employee identifier assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EmployeeId(i32);

impl EmployeeId {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub const fn value(self) -> i32 {
        self.0
    }

    /// The identifier following this one, or `None` once the id space is exhausted
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored employee record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub position: String,
}

impl Employee {
    pub fn new(id: EmployeeId, name: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            position: position.into(),
        }
    }

    /// Overwrite the mutable fields, keeping the id
    pub fn apply(&mut self, input: EmployeeInput) {
        self.name = input.name;
        self.position = input.position;
    }
}

/// Client supplied fields for create and update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeInput {
    pub name: String,
    pub position: String,
}

impl EmployeeInput {
    pub fn new(name: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
        }
    }
}

/// Records the store starts with
pub fn default_employees() -> Vec<Employee> {
    vec![
        Employee::new(EmployeeId::new(1), "John Doe", "Developer"),
        Employee::new(EmployeeId::new(2), "Jane Smith", "Manager"),
    ]
}
