//! Tool Router - picks the concrete tool call for a classified intent.
//!
//! Pure domain logic: keyword rules select a tool name, the catalog entry
//! confirms the agent actually exposes it.

use std::sync::Arc;

use crate::domain::foundation::AgentCategory;

use super::catalog::{AgentCatalog, AgentDescriptor};
use super::keyword_rules::{first_match, tool_rules};
use super::values::{Intent, ToolCall};

/// Selects tool calls from the agent catalog.
#[derive(Debug, Clone)]
pub struct ToolRouter {
    catalog: Arc<AgentCatalog>,
}

impl ToolRouter {
    pub fn new(catalog: Arc<AgentCatalog>) -> Self {
        Self { catalog }
    }

    /// Route an intent to tool calls.
    ///
    /// Returns an empty list when the intent has no category or the catalog has
    /// no usable entry for it. Otherwise returns exactly one call, belonging to
    /// the intent's category, with `{"query": message}` as parameters.
    pub fn route(&self, intent: &Intent, message: &str) -> Vec<ToolCall> {
        let Some(category) = intent.category else {
            return Vec::new();
        };

        let Some(descriptor) = self.catalog.get(category) else {
            tracing::warn!(%category, "No catalog entry for category; nothing to route");
            return Vec::new();
        };

        match Self::select_tool(category, descriptor, message) {
            Some(tool) => {
                let expected = expected_result(category, &tool);
                vec![ToolCall::with_query(category, tool, message, expected)]
            }
            None => {
                tracing::warn!(%category, "Agent declares no tools; nothing to route");
                Vec::new()
            }
        }
    }

    fn select_tool(
        category: AgentCategory,
        descriptor: &AgentDescriptor,
        message: &str,
    ) -> Option<String> {
        let rules = tool_rules(category);

        if let Some(tool) = first_match(rules.rules, message) {
            if descriptor.has_tool(tool) {
                return Some(tool.to_string());
            }
            tracing::debug!(%category, tool, "Rule target not in catalog, using default");
        }

        if descriptor.has_tool(rules.default_tool) {
            return Some(rules.default_tool.to_string());
        }

        descriptor.tools.first().cloned()
    }
}

/// Human-readable description of what a tool call should return.
fn expected_result(category: AgentCategory, tool: &str) -> String {
    match (category, tool) {
        (AgentCategory::Database, "search_listings") => "Listings matching the query".into(),
        (AgentCategory::Database, "get_listing_stats") => "Aggregate listing statistics".into(),
        (AgentCategory::Database, "get_category_stats") => "Per-category listing statistics".into(),
        (AgentCategory::Database, "get_user_listings") => "Listings owned by the user".into(),
        (AgentCategory::Advertising, "optimize_title") => "An optimized listing title".into(),
        (AgentCategory::Advertising, "suggest_price") => "A suggested price range".into(),
        (AgentCategory::Advertising, "improve_description") => {
            "An improved listing description".into()
        }
        (AgentCategory::Advertising, "analyze_listing") => "Advertising recommendations".into(),
        (AgentCategory::Stock, "check_stock_levels") => "Current stock levels".into(),
        (AgentCategory::Stock, "get_low_stock_alerts") => "Items running low on stock".into(),
        (AgentCategory::Stock, "get_inventory_summary") => "An inventory summary".into(),
        (category, tool) => format!("Result of {} from the {}", tool, category.display_name()),
    }
}
