//! Agent Catalog - read-only registry of backend agents.
//!
//! Built once at startup from configuration and shared behind an `Arc`.
//! Nothing mutates it after construction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::AgentCategory;

/// Static description of one backend agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    pub category: AgentCategory,
    pub name: String,
    pub base_url: String,
    pub description: String,
    /// Tool names in declaration order.
    pub tools: Vec<String>,
}

impl AgentDescriptor {
    pub fn new(
        category: AgentCategory,
        name: impl Into<String>,
        base_url: impl Into<String>,
        description: impl Into<String>,
        tools: Vec<String>,
    ) -> Self {
        Self {
            category,
            name: name.into(),
            base_url: base_url.into(),
            description: description.into(),
            tools,
        }
    }

    /// Endpoint that accepts tool invocations.
    pub fn process_url(&self) -> String {
        format!("{}/process", self.base_url.trim_end_matches('/'))
    }

    pub fn has_tool(&self, tool: &str) -> bool {
        self.tools.iter().any(|t| t == tool)
    }
}

/// Immutable mapping from category to agent descriptor.
#[derive(Debug, Clone, Default)]
pub struct AgentCatalog {
    agents: BTreeMap<AgentCategory, AgentDescriptor>,
}

impl AgentCatalog {
    /// Builds the catalog. A later descriptor for the same category replaces an earlier one.
    pub fn new(descriptors: impl IntoIterator<Item = AgentDescriptor>) -> Self {
        let agents = descriptors
            .into_iter()
            .map(|d| (d.category, d))
            .collect();
        Self { agents }
    }

    pub fn get(&self, category: AgentCategory) -> Option<&AgentDescriptor> {
        self.agents.get(&category)
    }

    /// Descriptors ordered by category.
    pub fn descriptors(&self) -> impl Iterator<Item = &AgentDescriptor> {
        self.agents.values()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
