//! Ordered keyword rule tables.
//!
//! Rules are evaluated top to bottom against the lower-cased message and the
//! first rule with any matching keyword wins. Adding a rule means adding a row;
//! priority is the row order.

use crate::domain::foundation::AgentCategory;

/// A set of substrings that select `target` when any of them appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule<T> {
    pub keywords: &'static [&'static str],
    pub target: T,
}

impl<T: Copy> KeywordRule<T> {
    pub const fn new(keywords: &'static [&'static str], target: T) -> Self {
        Self { keywords, target }
    }

    /// `text` must already be lower-cased.
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k))
    }
}

/// Returns the target of the first matching rule.
pub fn first_match<T: Copy>(rules: &[KeywordRule<T>], message: &str) -> Option<T> {
    let lowercase = message.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&lowercase))
        .map(|rule| rule.target)
}

/// Category rules for the keyword classifier: database, advertising, stock.
pub const CATEGORY_RULES: &[KeywordRule<AgentCategory>] = &[
    KeywordRule::new(
        &[
            "search",
            "find",
            "listings",
            "stats",
            "statistics",
            "how many",
            "count",
            "category",
            "categories",
            "total",
        ],
        AgentCategory::Database,
    ),
    KeywordRule::new(
        &[
            "optimize",
            "improve",
            "title",
            "description",
            "price",
            "pricing",
            "advertis",
            "marketing",
            "seo",
            "promote",
        ],
        AgentCategory::Advertising,
    ),
    KeywordRule::new(
        &["stock", "inventory", "restock", "quantity", "supply", "warehouse"],
        AgentCategory::Stock,
    ),
];

/// Per-category tool selection rules and the default tool.
#[derive(Debug, Clone, Copy)]
pub struct ToolRuleSet {
    pub rules: &'static [KeywordRule<&'static str>],
    pub default_tool: &'static str,
}

static DATABASE_TOOLS: ToolRuleSet = ToolRuleSet {
    rules: &[
        KeywordRule::new(&["search", "find", "look for"], "search_listings"),
        KeywordRule::new(&["stat", "count", "how many", "total"], "get_listing_stats"),
        KeywordRule::new(&["categor"], "get_category_stats"),
        KeywordRule::new(&["my listings", "user"], "get_user_listings"),
    ],
    default_tool: "search_listings",
};

static ADVERTISING_TOOLS: ToolRuleSet = ToolRuleSet {
    rules: &[
        KeywordRule::new(&["title"], "optimize_title"),
        KeywordRule::new(&["price", "pricing", "cost"], "suggest_price"),
        KeywordRule::new(&["description"], "improve_description"),
    ],
    default_tool: "analyze_listing",
};

static STOCK_TOOLS: ToolRuleSet = ToolRuleSet {
    rules: &[
        KeywordRule::new(&["low", "alert", "restock"], "get_low_stock_alerts"),
        KeywordRule::new(&["summary", "overview", "report"], "get_inventory_summary"),
    ],
    default_tool: "check_stock_levels",
};

/// Tool rules for a category.
pub fn tool_rules(category: AgentCategory) -> &'static ToolRuleSet {
    match category {
        AgentCategory::Database => &DATABASE_TOOLS,
        AgentCategory::Advertising => &ADVERTISING_TOOLS,
        AgentCategory::Stock => &STOCK_TOOLS,
    }
}

/// Tools each agent exposes out of the box, in declaration order.
pub fn default_tools(category: AgentCategory) -> Vec<String> {
    let names: &[&str] = match category {
        AgentCategory::Database => &[
            "search_listings",
            "get_listing_stats",
            "get_category_stats",
            "get_user_listings",
        ],
        AgentCategory::Advertising => &[
            "optimize_title",
            "suggest_price",
            "improve_description",
            "analyze_listing",
        ],
        AgentCategory::Stock => &[
            "check_stock_levels",
            "get_low_stock_alerts",
            "get_inventory_summary",
        ],
    };
    names.iter().map(|s| s.to_string()).collect()
}
