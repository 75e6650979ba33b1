//! Agent catalog configuration
//!
//! Every category has built-in defaults; any field can be overridden, e.g.
//! `ORCHESTRATOR__AGENTS__DATABASE__BASE_URL=http://db-agent:8002`.

use serde::Deserialize;

use crate::domain::foundation::AgentCategory;
use crate::domain::orchestration::{default_tools, AgentCatalog, AgentDescriptor};

use super::error::ValidationError;
use super::is_http_url;

/// Overrides for one agent; unset fields take the category default
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentEntryConfig {
    pub name: Option<String>,
    pub base_url: Option<String>,
    pub description: Option<String>,
    pub tools: Option<Vec<String>>,
}

/// Agent catalog configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentsConfig {
    #[serde(default)]
    pub advertising: AgentEntryConfig,

    #[serde(default)]
    pub database: AgentEntryConfig,

    #[serde(default)]
    pub stock: AgentEntryConfig,
}

impl AgentsConfig {
    fn entry(&self, category: AgentCategory) -> &AgentEntryConfig {
        match category {
            AgentCategory::Advertising => &self.advertising,
            AgentCategory::Database => &self.database,
            AgentCategory::Stock => &self.stock,
        }
    }

    /// Resolved descriptor for a category
    pub fn descriptor(&self, category: AgentCategory) -> AgentDescriptor {
        let entry = self.entry(category);
        AgentDescriptor::new(
            category,
            entry
                .name
                .clone()
                .unwrap_or_else(|| category.display_name().to_string()),
            entry
                .base_url
                .clone()
                .unwrap_or_else(|| default_base_url(category).to_string()),
            entry
                .description
                .clone()
                .unwrap_or_else(|| default_description(category).to_string()),
            entry.tools.clone().unwrap_or_else(|| default_tools(category)),
        )
    }

    /// Build the immutable catalog
    pub fn catalog(&self) -> AgentCatalog {
        AgentCatalog::new(AgentCategory::all().iter().map(|&c| self.descriptor(c)))
    }

    /// Validate agent configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for &category in AgentCategory::all() {
            let descriptor = self.descriptor(category);
            if !is_http_url(&descriptor.base_url) {
                return Err(ValidationError::InvalidUrl {
                    field: format!("agents.{}.base_url", category),
                    value: descriptor.base_url,
                });
            }
            if descriptor.tools.is_empty() {
                return Err(ValidationError::NoTools(category.to_string()));
            }
        }
        Ok(())
    }
}

fn default_base_url(category: AgentCategory) -> &'static str {
    match category {
        AgentCategory::Advertising => "http://localhost:8001",
        AgentCategory::Database => "http://localhost:8002",
        AgentCategory::Stock => "http://localhost:8003",
    }
}

fn default_description(category: AgentCategory) -> &'static str {
    match category {
        AgentCategory::Advertising => {
            "Optimizes listing titles, descriptions and pricing for better visibility"
        }
        AgentCategory::Database => "Searches listings and reports listing and category statistics",
        AgentCategory::Stock => "Tracks stock levels, low-stock alerts and inventory summaries",
    }
}
