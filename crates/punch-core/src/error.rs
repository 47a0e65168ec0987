//! Error taxonomy shared by the registry, ledger and aggregates.

use chrono::NaiveDate;
use thiserror::Error;

use crate::shift::UnknownShift;
use crate::types::{EmployeeId, ValidationError};

/// Failures of attendance operations.
///
/// Every variant except [`AttendanceError::InvalidInput`] is an expected business
/// outcome; callers decide how to present it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttendanceError {
    /// The operation referenced an employee that is not registered.
    #[error("employee {id} is not registered")]
    UnknownEmployee { id: EmployeeId },

    /// Registration used an ID that is already taken.
    #[error("employee {id} is already registered")]
    DuplicateEmployee { id: EmployeeId },

    /// Registration used a shift outside the enumeration.
    #[error("invalid shift '{value}', expected one of: morning, afternoon, night")]
    InvalidShift { value: String },

    /// An exit was requested with no open entrance for that employee and day.
    #[error("no open entrance for employee {id} on {date}")]
    NoOpenEntrance { id: EmployeeId, date: NaiveDate },

    /// An exit was requested before any event was recorded.
    #[error("no attendance events recorded yet")]
    EmptyLedger,

    /// A statistic was requested over an empty registry.
    #[error("no employees registered")]
    NoEmployees,

    /// Strict entrance policy: the employee already has an open record that day.
    #[error("employee {id} already has an open entrance on {date}")]
    EntranceAlreadyOpen { id: EmployeeId, date: NaiveDate },

    /// Malformed input.
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),
}

impl From<UnknownShift> for AttendanceError {
    fn from(err: UnknownShift) -> Self {
        Self::InvalidShift {
            value: err.value().to_string(),
        }
    }
}
