// src/enums.rs
//! Public enum types used throughout the crate
//!
//! Central location for the user-visible choices: stored gender codes
//! and the empty-manifest ingestion policy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Three-way gender code stored next to the envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenderCode {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "Other")]
    Other,
}

impl GenderCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenderCode::Male => "M",
            GenderCode::Female => "F",
            GenderCode::Other => "Other",
        }
    }
}

impl fmt::Display for GenderCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenderCode {
    type Err = String;

    /// Parses the stored column value, not free text (see `normalize_gender`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(GenderCode::Male),
            "F" => Ok(GenderCode::Female),
            "Other" => Ok(GenderCode::Other),
            other => Err(format!("unknown gender code {other:?}")),
        }
    }
}

/// What to do with a CSV that has a header but no data rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmptyManifestPolicy {
    /// Clear the admin's manifest and report zero rows stored
    #[default]
    Replace,
    /// Treat the file as invalid input and leave the manifest alone
    Reject,
}
