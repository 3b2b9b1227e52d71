use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message reported when schedule generation fails for any reason other than
/// invalid input.
pub const GENERAL_FAILURE_MESSAGE: &str = "Failed to calculate loan schedule";

/// Loan parameter a validation message is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoanField {
    Principal,
    InterestRate,
    TermMonths,
    /// Not tied to a single field (computation failures).
    General,
}

impl LoanField {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanField::Principal => "principal",
            LoanField::InterestRate => "interestRate",
            LoanField::TermMonths => "termMonths",
            LoanField::General => "general",
        }
    }
}

impl fmt::Display for LoanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field to message mapping, one entry per offending field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<LoanField, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single entry under [`LoanField::General`].
    pub fn general(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(LoanField::General, message);
        errors
    }

    pub fn insert(&mut self, field: LoanField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: LoanField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: LoanField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LoanField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum LoanError {
    #[error("Invalid loan parameters: {0}")]
    Validation(ValidationErrors),

    #[error("Computation failure: {0}")]
    Computation(String),

    #[error("No amortization schedule has been computed")]
    NoSchedule,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type LoanResult<T> = Result<T, LoanError>;
