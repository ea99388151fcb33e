//! Error types for cost calculation and scenario generation

use std::fmt;

use thiserror::Error;

use crate::models::ScenarioKind;

/// Which reference table a failed lookup targeted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Role,
    Location,
    BaseSalary,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceKind::Role => "job role",
            ReferenceKind::Location => "location",
            ReferenceKind::BaseSalary => "base salary for role",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("unknown {kind} '{id}'")]
    UnknownReference { kind: ReferenceKind, id: String },

    #[error("scenario set is missing the '{missing}' scenario")]
    IncompleteScenarioSet { missing: ScenarioKind },

    #[error("invalid reference catalog: {0}")]
    InvalidCatalog(String),

    #[error("invalid allocation: {0}")]
    InvalidAllocation(String),
}

impl CalcError {
    pub fn unknown(kind: ReferenceKind, id: &str) -> Self {
        CalcError::UnknownReference {
            kind,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
