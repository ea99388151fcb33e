//! Staffing cost calculator
//!
//! Prices a job role at one or more locations and proposes geographic
//! staffing scenarios (current, cost-effective, balanced) with narrative
//! insights. All calculations are pure functions over an immutable
//! [`ReferenceCatalog`].

pub mod allocation;
pub mod analysis;
pub mod calculator;
pub mod catalog;
pub mod db;
pub mod error;
pub mod insights;
pub mod logging;
pub mod models;
pub mod report;
pub mod scenarios;

pub use analysis::{Analysis, analyze};
pub use calculator::calculate_employee_cost;
pub use catalog::ReferenceCatalog;
pub use error::{CalcError, ReferenceKind};
pub use insights::generate_insights;
pub use models::{EmploymentType, Policy, ScenarioKind, ScenarioSet, StaffingRequest};
pub use scenarios::generate_scenarios;
