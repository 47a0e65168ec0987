//! Employee registry: the set of known employees, unique by ID.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::AttendanceError;
use crate::shift::Shift;
use crate::types::{EmployeeId, ValidationError};

/// A registered employee. Never mutated after registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub age: u32,
    pub shift: Shift,
}

/// Unvalidated registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub id: String,
    pub name: String,
    pub age: i64,
    pub shift: String,
}

/// Read access to the employees known to the system.
///
/// The ledger and the aggregates only depend on this trait, so they can run against
/// the in-memory [`Registry`] or any other source of employees.
pub trait EmployeeDirectory {
    /// Returns true if an employee with this ID is registered.
    fn exists(&self, id: &EmployeeId) -> bool {
        self.get(id).is_some()
    }

    /// Looks up an employee by ID.
    fn get(&self, id: &EmployeeId) -> Option<&Employee>;

    /// All employees, in registration order.
    fn all(&self) -> Vec<&Employee>;
}

/// In-memory employee registry preserving registration order.
#[derive(Debug, Default)]
pub struct Registry {
    employees: Vec<Employee>,
    by_id: HashMap<EmployeeId, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and registers a new employee.
    ///
    /// The shift is checked first, then the remaining fields, then uniqueness.
    /// A rejected registration leaves the registry unchanged.
    pub fn register(&mut self, new: NewEmployee) -> Result<&Employee, AttendanceError> {
        let shift: Shift = new.shift.parse()?;
        let id = EmployeeId::new(new.id)?;

        let name = new.name.trim();
        if name.is_empty() {
            return Err(ValidationError::Empty { field: "name" }.into());
        }
        let age = u32::try_from(new.age)
            .ok()
            .filter(|age| *age > 0)
            .ok_or(ValidationError::InvalidAge { value: new.age })?;

        if self.by_id.contains_key(&id) {
            return Err(AttendanceError::DuplicateEmployee { id });
        }

        let position = self.employees.len();
        self.by_id.insert(id.clone(), position);
        self.employees.push(Employee {
            id,
            name: name.to_string(),
            age,
            shift,
        });
        Ok(&self.employees[position])
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Iterates employees in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Employee> {
        self.employees.iter()
    }
}

impl EmployeeDirectory for Registry {
    fn exists(&self, id: &EmployeeId) -> bool {
        self.by_id.contains_key(id)
    }

    fn get(&self, id: &EmployeeId) -> Option<&Employee> {
        self.by_id.get(id).map(|&position| &self.employees[position])
    }

    fn all(&self) -> Vec<&Employee> {
        self.employees.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_employee(id: &str, name: &str, age: i64, shift: &str) -> NewEmployee {
        NewEmployee {
            id: id.to_string(),
            name: name.to_string(),
            age,
            shift: shift.to_string(),
        }
    }

    #[test]
    fn register_normalizes_shift() {
        let mut registry = Registry::new();
        let employee = registry
            .register(new_employee("001", "João", 28, "MORNING"))
            .unwrap();
        assert_eq!(employee.shift, Shift::Morning);
        assert_eq!(employee.name, "João");
        assert_eq!(employee.age, 28);
    }

    #[test]
    fn duplicate_registration_is_rejected_and_leaves_registry_unchanged() {
        let mut registry = Registry::new();
        registry
            .register(new_employee("001", "João", 28, "morning"))
            .unwrap();

        for _ in 0..2 {
            let err = registry
                .register(new_employee("001", "Maria", 35, "night"))
                .unwrap_err();
            assert_eq!(
                err,
                AttendanceError::DuplicateEmployee {
                    id: EmployeeId::new("001").unwrap()
                }
            );
        }

        assert_eq!(registry.len(), 1);
        let stored = registry.get(&EmployeeId::new("001").unwrap()).unwrap();
        assert_eq!(stored.name, "João");
        assert_eq!(stored.shift, Shift::Morning);
    }

    #[test]
    fn invalid_shift_is_rejected() {
        let mut registry = Registry::new();
        let err = registry
            .register(new_employee("001", "João", 28, "evening"))
            .unwrap_err();
        assert_eq!(
            err,
            AttendanceError::InvalidShift {
                value: "evening".to_string()
            }
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn shift_is_checked_before_duplicates() {
        let mut registry = Registry::new();
        registry
            .register(new_employee("001", "João", 28, "morning"))
            .unwrap();
        let err = registry
            .register(new_employee("001", "João", 28, "dawn"))
            .unwrap_err();
        assert!(matches!(err, AttendanceError::InvalidShift { .. }));
    }

    #[test]
    fn malformed_fields_are_invalid_input() {
        let mut registry = Registry::new();

        let err = registry
            .register(new_employee(" ", "João", 28, "morning"))
            .unwrap_err();
        assert_eq!(
            err,
            AttendanceError::InvalidInput(ValidationError::Empty {
                field: "employee ID"
            })
        );

        let err = registry
            .register(new_employee("001", "  ", 28, "morning"))
            .unwrap_err();
        assert_eq!(
            err,
            AttendanceError::InvalidInput(ValidationError::Empty { field: "name" })
        );

        for age in [0, -3] {
            let err = registry
                .register(new_employee("001", "João", age, "morning"))
                .unwrap_err();
            assert_eq!(
                err,
                AttendanceError::InvalidInput(ValidationError::InvalidAge { value: age })
            );
        }

        assert!(registry.is_empty());
    }

    #[test]
    fn directory_lookups() {
        let mut registry = Registry::new();
        registry
            .register(new_employee("002", "Ana", 40, "night"))
            .unwrap();
        registry
            .register(new_employee("001", "João", 28, "morning"))
            .unwrap();

        assert!(registry.exists(&EmployeeId::new("001").unwrap()));
        assert!(!registry.exists(&EmployeeId::new("999").unwrap()));
        assert!(registry.get(&EmployeeId::new("999").unwrap()).is_none());

        let ids: Vec<&str> = registry.all().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["002", "001"]);
    }
}
