//! AgentCategory enum identifying the specialized backend agents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The backend agents a request can be dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentCategory {
    Advertising,
    Database,
    Stock,
}

impl AgentCategory {
    /// Returns all categories in canonical order.
    pub fn all() -> &'static [AgentCategory] {
        &[
            AgentCategory::Advertising,
            AgentCategory::Database,
            AgentCategory::Stock,
        ]
    }

    /// Returns the wire identifier (used in tool identifiers and prompts).
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentCategory::Advertising => "advertising",
            AgentCategory::Database => "database",
            AgentCategory::Stock => "stock",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            AgentCategory::Advertising => "Advertising Agent",
            AgentCategory::Database => "Database Agent",
            AgentCategory::Stock => "Stock Agent",
        }
    }
}

impl fmt::Display for AgentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown agent category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for AgentCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "advertising" => Ok(AgentCategory::Advertising),
            "database" => Ok(AgentCategory::Database),
            "stock" => Ok(AgentCategory::Stock),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}
