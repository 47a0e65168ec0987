//! Core domain logic for employee attendance.
//!
//! This crate contains:
//! - Registry: the employees known to the system, unique by ID
//! - Ledger: append-only clock events and entrance/exit pairing
//! - Aggregates: shift tallies and age statistics for reports and charts
//!
//! It performs no I/O, formatting or logging; callers decide how to present results.

pub mod aggregate;
mod error;
pub mod ledger;
pub mod registry;
mod shift;
mod types;

pub use aggregate::{AgePoint, AgeStats, ShiftShare, Summary};
pub use error::AttendanceError;
pub use ledger::{AttendanceRecord, ClockEvent, ClockStamp, Ledger};
pub use registry::{Employee, EmployeeDirectory, NewEmployee, Registry};
pub use shift::{Shift, UnknownShift};
pub use types::{ClockKind, EmployeeId, EntrancePolicy, EventId, ValidationError};
