//! Allocation engine: pure, side-effect-free computations over collections
//! that have already been fetched. Nothing in here performs I/O, and a missing
//! cross-reference is treated as "not found" rather than as an error.

pub mod calculations;
pub mod impact;
pub mod warnings;

pub use calculations::*;
pub use impact::{AffectedProject, LeaveImpact, leave_impact};
pub use warnings::{
    Shortfall, UnderAllocationCheck, Warning, check_productivity_mismatch,
    check_project_under_allocation, generate_allocation_warnings, under_allocation_warning,
};
