//! Console command implementations.

pub mod clock;
pub mod employees;
pub mod records;
pub mod report;
pub mod sample;
pub mod util;
