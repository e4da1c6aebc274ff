//! Deterministic theme and priority triage for GitHub issue batches.
//!
//! Raw records are enriched once with a keyword-scored theme and a rule-based
//! priority, then read through a pure filter/sort/pin pipeline that backs the
//! dashboard table.

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod dashboard;
pub mod enrich;
pub mod error;
pub mod lexicon;
pub mod loader;
pub mod pipeline;
pub mod summary;
pub mod types;
pub mod view;

pub use catalog::{RiskTier, Theme, ThemeCatalog, TopIssue, TopIssueInfo, TopIssueMap, UserStory};
pub use classifier::{IssueClassifier, PriorityClassifier, ThemeClassifier};
pub use config::{Config, ConfigBuilder};
pub use dashboard::Dashboard;
pub use enrich::{enrich_issue, enrich_issues};
pub use error::{Error, Result};
pub use lexicon::{Keyword, Lexicon, SignalWords};
pub use pipeline::{IssuePipeline, Page, Row, PAGE_SIZE};
pub use summary::{IssueSummary, ThemeOverview};
pub use types::{Issue, IssueState, Priority, RawIssue, ThemeId};
pub use view::{SortField, SortOrder, ViewState};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::classifier::IssueClassifier;
    pub use crate::config::{Config, ConfigBuilder};
    pub use crate::dashboard::Dashboard;
    pub use crate::error::{Error, Result};
    pub use crate::pipeline::IssuePipeline;
    pub use crate::types::{Issue, IssueState, Priority, RawIssue, ThemeId};
    pub use crate::view::{SortField, SortOrder, ViewState};
}
