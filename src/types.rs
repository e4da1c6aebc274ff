use crate::error::Error;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Problem-category label assigned to every issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeId {
    TerminalRendering,
    PermissionsSecurity,
    MemoryPerformance,
    CrossPlatform,
    McpExtensibility,
    ContextAgents,
    AuthBilling,
    Other,
}

impl ThemeId {
    /// The seven named themes in declaration order, without the catch-all
    pub const NAMED: [ThemeId; 7] = [
        ThemeId::TerminalRendering,
        ThemeId::PermissionsSecurity,
        ThemeId::MemoryPerformance,
        ThemeId::CrossPlatform,
        ThemeId::McpExtensibility,
        ThemeId::ContextAgents,
        ThemeId::AuthBilling,
    ];

    /// Every theme, catch-all last
    pub const ALL: [ThemeId; 8] = [
        ThemeId::TerminalRendering,
        ThemeId::PermissionsSecurity,
        ThemeId::MemoryPerformance,
        ThemeId::CrossPlatform,
        ThemeId::McpExtensibility,
        ThemeId::ContextAgents,
        ThemeId::AuthBilling,
        ThemeId::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::TerminalRendering => "terminal-rendering",
            ThemeId::PermissionsSecurity => "permissions-security",
            ThemeId::MemoryPerformance => "memory-performance",
            ThemeId::CrossPlatform => "cross-platform",
            ThemeId::McpExtensibility => "mcp-extensibility",
            ThemeId::ContextAgents => "context-agents",
            ThemeId::AuthBilling => "auth-billing",
            ThemeId::Other => "other",
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ThemeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        ThemeId::ALL
            .iter()
            .copied()
            .find(|theme| theme.as_str() == needle)
            .ok_or_else(|| Error::UnknownTheme(s.to_string()))
    }
}

/// Severity tier. Declaration order gives the sort order P0 < P1 < P2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    P0,
    P1,
    P2,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::P0, Priority::P1, Priority::P2];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::P0 => "P0",
            Priority::P1 => "P1",
            Priority::P2 => "P2",
        }
    }

    /// Human-facing label used in filter menus and summary cards
    pub fn label(&self) -> &'static str {
        match self {
            Priority::P0 => "P0 - Critical",
            Priority::P1 => "P1 - High",
            Priority::P2 => "P2 - Medium",
        }
    }

    pub fn ordinal(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "P0" => Ok(Priority::P0),
            "P1" => Ok(Priority::P1),
            "P2" => Ok(Priority::P2),
            _ => Err(Error::UnknownPriority(s.to_string())),
        }
    }
}

/// Issue lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    /// Normalize a raw state field. Only an exact `closed` is closed.
    pub fn from_raw(raw: &str) -> Self {
        if raw == "closed" {
            IssueState::Closed
        } else {
            IssueState::Open
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for IssueState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(IssueState::Open),
            "closed" => Ok(IssueState::Closed),
            _ => Err(Error::UnknownState(s.to_string())),
        }
    }
}

/// A record as it arrives from the ingestion collaborator.
///
/// Every field is optional; defaults are applied once, during enrichment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIssue {
    #[serde(default, deserialize_with = "lenient_text")]
    pub number: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub closed_at: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub ai_summary: Option<String>,
}

/// Accept text, bare numbers, or null for fields the source sends as text
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// A fully classified issue. Never mutated after enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Zero when the source number could not be parsed
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    pub created_at: String,
    pub closed_at: Option<String>,
    pub author: String,
    pub url: String,
    pub summary: String,
    pub theme: ThemeId,
    pub priority: Priority,
}

impl Issue {
    /// False for the zero sentinel produced by an unparsable source number
    pub fn has_valid_number(&self) -> bool {
        self.number != 0
    }

    pub fn is_open(&self) -> bool {
        self.state == IssueState::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_round_trips_through_str() {
        for theme in ThemeId::ALL {
            assert_eq!(theme.as_str().parse::<ThemeId>().unwrap(), theme);
        }
        assert!(matches!(
            "gardening".parse::<ThemeId>(),
            Err(Error::UnknownTheme(_))
        ));
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::P0 < Priority::P1);
        assert!(Priority::P1 < Priority::P2);
        assert_eq!(Priority::P2.ordinal(), 2);
        assert_eq!("p1".parse::<Priority>().unwrap(), Priority::P1);
    }

    #[test]
    fn test_state_normalization_is_exact() {
        assert_eq!(IssueState::from_raw("closed"), IssueState::Closed);
        assert_eq!(IssueState::from_raw("CLOSED"), IssueState::Open);
        assert_eq!(IssueState::from_raw(""), IssueState::Open);
    }

    #[test]
    fn test_raw_issue_accepts_numeric_number() {
        let raw: RawIssue =
            serde_json::from_str(r#"{"number": 26913, "title": "x", "author": null}"#).unwrap();
        assert_eq!(raw.number.as_deref(), Some("26913"));
        assert_eq!(raw.author, None);
        assert_eq!(raw.ai_summary, None);
    }

    #[test]
    fn test_issue_serializes_camel_case() {
        let issue = Issue {
            number: 1,
            title: "t".into(),
            state: IssueState::Closed,
            created_at: "2026-02-01".into(),
            closed_at: None,
            author: "a".into(),
            url: "u".into(),
            summary: String::new(),
            theme: ThemeId::AuthBilling,
            priority: Priority::P1,
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["createdAt"], "2026-02-01");
        assert_eq!(json["theme"], "auth-billing");
        assert_eq!(json["state"], "closed");
        assert_eq!(json["priority"], "P1");
        assert!(!issue.is_open());
    }
}
