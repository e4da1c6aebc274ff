//! Static analyst-curated tables: theme metadata, user stories and the top-issue ranking.
//!
//! The estimated counts here are the analyst's manual estimate. They are
//! independent of what the classifier produces for a given batch and are never
//! reconciled with it.

use crate::error::Result;
use crate::types::{Priority, ThemeId};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Risk tier declared for a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Critical,
    High,
    #[serde(rename = "Medium-High")]
    MediumHigh,
    Medium,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Critical => "Critical",
            RiskTier::High => "High",
            RiskTier::MediumHigh => "Medium-High",
            RiskTier::Medium => "Medium",
        }
    }
}

/// Display metadata for one theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: ThemeId,
    pub label: String,
    pub description: String,
    pub risk: RiskTier,
    /// Declared priority, not derived from per-issue classification
    pub priority: Priority,
    pub estimated_count: u32,
    pub percentage: f64,
    pub color: String,
}

impl Theme {
    /// Estimated volume relative to `max`, in `0.0..=1.0`
    pub fn volume_ratio(&self, max: u32) -> f64 {
        if max == 0 {
            return 0.0;
        }
        (f64::from(self.estimated_count) / f64::from(max)).min(1.0)
    }
}

/// The seven named themes plus the catch-all record
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeCatalog {
    themes: Vec<Theme>,
    other: Theme,
}

impl ThemeCatalog {
    pub fn new(themes: Vec<Theme>, other: Theme) -> Self {
        Self { themes, other }
    }

    /// Named themes in display order
    pub fn named(&self) -> &[Theme] {
        &self.themes
    }

    pub fn other(&self) -> &Theme {
        &self.other
    }

    /// Named themes followed by the catch-all
    pub fn all(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter().chain(std::iter::once(&self.other))
    }

    /// Metadata for `id`, falling back to the catch-all
    pub fn get(&self, id: ThemeId) -> &Theme {
        self.themes
            .iter()
            .find(|theme| theme.id == id)
            .unwrap_or(&self.other)
    }

    /// Largest estimate among the named themes
    pub fn max_estimated_count(&self) -> u32 {
        self.themes
            .iter()
            .map(|theme| theme.estimated_count)
            .max()
            .unwrap_or(0)
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        let themes = vec![
            theme(
                ThemeId::TerminalRendering,
                "Terminal Rendering & UI",
                "Flickering, scrolling, text corruption, React infinite re-render loops, and layout breakage across terminal emulators and multiplexers.",
                RiskTier::Critical,
                Priority::P0,
                130,
                13.0,
                "#EF4444",
            ),
            theme(
                ThemeId::PermissionsSecurity,
                "Permissions & Security",
                "Permission allow/deny rules ignored, glob patterns broken, destructive commands executing without consent, CLAUDE.md directory traversal.",
                RiskTier::Critical,
                Priority::P0,
                75,
                7.5,
                "#F97316",
            ),
            theme(
                ThemeId::MemoryPerformance,
                "Memory & Performance",
                "Memory leaks (up to 36 GB), 537 GB disk space leaks, heap OOM crashes, Bun runtime crashes, and progressive degradation.",
                RiskTier::High,
                Priority::P1,
                90,
                9.0,
                "#EAB308",
            ),
            theme(
                ThemeId::CrossPlatform,
                "Cross-Platform & VM",
                "Windows Bash tool broken (exit code 1), ARM64 crashes, Cowork VM networking failures, enterprise AD username issues. Windows is non-functional for most users.",
                RiskTier::Critical,
                Priority::P0,
                195,
                19.5,
                "#3B82F6",
            ),
            theme(
                ThemeId::McpExtensibility,
                "MCP & Extensibility",
                "MCP parameter double-stringification, orphaned server processes, plugin install 404s, hooks not firing, marketplace stale state.",
                RiskTier::High,
                Priority::P1,
                120,
                12.0,
                "#8B5CF6",
            ),
            theme(
                ThemeId::ContextAgents,
                "Context, Agents & Model",
                "Premature context exhaustion, plans lost after compaction, subagent crashes (classifyHandoffIfNeeded), model hallucinations and instruction ignoring.",
                RiskTier::High,
                Priority::P1,
                140,
                14.0,
                "#EC4899",
            ),
            theme(
                ThemeId::AuthBilling,
                "Auth, Sessions & Billing",
                "sessions-index.json regression breaking /resume, hourly re-auth, OAuth failures, usage mismatches, incorrect billing charges.",
                RiskTier::High,
                Priority::P1,
                115,
                11.5,
                "#14B8A6",
            ),
        ];
        let other = theme(
            ThemeId::Other,
            "Other / Uncategorized",
            "Issues that don't clearly map to a primary theme.",
            RiskTier::Medium,
            Priority::P2,
            135,
            13.5,
            "#6B7280",
        );
        Self::new(themes, other)
    }
}

#[allow(clippy::too_many_arguments)]
fn theme(
    id: ThemeId,
    label: &str,
    description: &str,
    risk: RiskTier,
    priority: Priority,
    estimated_count: u32,
    percentage: f64,
    color: &str,
) -> Theme {
    Theme {
        id,
        label: label.to_string(),
        description: description.to_string(),
        risk,
        priority,
        estimated_count,
        percentage,
        color: color.to_string(),
    }
}

/// Illustrative persona narrative tied to a theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStory {
    pub id: u32,
    pub persona: String,
    pub need: String,
    pub reason: String,
    pub theme: ThemeId,
    pub issue_count: u32,
}

impl UserStory {
    /// "As <persona>, I need <need> so that <reason>."
    pub fn sentence(&self) -> String {
        format!(
            "As {}, I need {} so that {}.",
            self.persona, self.need, self.reason
        )
    }
}

pub fn user_stories() -> Vec<UserStory> {
    let rows: [(&str, &str, &str, ThemeId, u32); 7] = [
        (
            "a developer using terminal multiplexers",
            "stable terminal rendering",
            "I can read output, type input, and review diffs without flickering or scroll jitter",
            ThemeId::TerminalRendering,
            130,
        ),
        (
            "a security-conscious engineer",
            "permission controls that actually work",
            "I can trust that deny rules, glob patterns, and CLAUDE.md restrictions prevent unauthorized actions",
            ThemeId::PermissionsSecurity,
            75,
        ),
        (
            "a power user running long coding sessions",
            "stable memory and CPU usage",
            "my system doesn't freeze from 36+ GB memory leaks or 537 GB disk leaks",
            ThemeId::MemoryPerformance,
            90,
        ),
        (
            "a Windows / WSL developer",
            "first-class cross-platform and VM support",
            "the Bash tool actually executes commands and Cowork VMs boot reliably on my platform",
            ThemeId::CrossPlatform,
            195,
        ),
        (
            "a developer building MCP integrations",
            "reliable MCP servers, hooks, and plugins",
            "servers connect, plugins install, hooks fire, and processes terminate cleanly",
            ThemeId::McpExtensibility,
            120,
        ),
        (
            "a user with long-running conversations",
            "reliable context, agents, and model behavior",
            "plans survive compaction, subagents don't crash, and the model follows my instructions",
            ThemeId::ContextAgents,
            140,
        ),
        (
            "a CI/CD pipeline operator",
            "persistent auth, sessions, and accurate billing",
            "workflows don't break from expired tokens, /resume works, and usage charges are correct",
            ThemeId::AuthBilling,
            115,
        ),
    ];

    rows.iter()
        .zip(1..)
        .map(|((persona, need, reason, theme, issue_count), id)| UserStory {
            id,
            persona: persona.to_string(),
            need: need.to_string(),
            reason: reason.to_string(),
            theme: *theme,
            issue_count: *issue_count,
        })
        .collect()
}

/// `#<digits>` reference inside a ranking entry
const ISSUE_REFERENCE: &str = r"#(\d+)";

/// One curated entry of the top-issue ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopIssue {
    pub rank: u32,
    /// Free text such as `#26400 + #26245 + #24571`
    pub issue_numbers: String,
    pub theme: ThemeId,
    pub rationale: String,
}

impl TopIssue {
    /// Every `#<digits>` reference in the entry, in written order
    pub fn issue_numbers(&self) -> Result<Vec<u64>> {
        let reference = Regex::new(ISSUE_REFERENCE)?;
        Ok(reference
            .captures_iter(&self.issue_numbers)
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| m.as_str().parse().ok())
            .collect())
    }
}

pub fn top_issues() -> Vec<TopIssue> {
    let rows: [(&str, ThemeId, &str); 10] = [
        (
            "#26913",
            ThemeId::PermissionsSecurity,
            "Agent executed destructive database command without user confirmation. Safety-critical, direct parallel to v1's #6608.",
        ),
        (
            "#26911",
            ThemeId::MemoryPerformance,
            "Task .output files never cleaned: 537 GB from single session. Catastrophic disk leak. Straightforward fix.",
        ),
        (
            "#26481",
            ThemeId::CrossPlatform,
            "Bash tool exit 1 on Windows/MINGW (set -o onecmd injection). Root cause for 5-8 related Windows failures.",
        ),
        (
            "#26850",
            ThemeId::TerminalRendering,
            "Write tool creating .md file permanently crashes session renderer (infinite setState loop). Unrecoverable.",
        ),
        (
            "#26400 + #26245 + #24571",
            ThemeId::ContextAgents,
            "classifyHandoffIfNeeded is not defined. Recurring subagent crash in 5+ issues. Likely a missing import.",
        ),
        (
            "#25685 + #25032 + #24729",
            ThemeId::AuthBilling,
            "sessions-index.json stops updating, breaking --resume. Structural regression since v2.1.31.",
        ),
        (
            "#26805 + #26881",
            ThemeId::CrossPlatform,
            "Cowork: Responses not rendering until user types. Makes the feature appear completely broken.",
        ),
        (
            "#26912 + #26873",
            ThemeId::CrossPlatform,
            "Cowork Windows: VM boots but API unreachable (NAT/network failures). Blocks feature for most Windows users.",
        ),
        (
            "#24960 + #24583",
            ThemeId::MemoryPerformance,
            "Kernel panic from 17-36 GB memory consumption. Causes hardware-level crashes. Safety issue.",
        ),
        (
            "#26951 + #26948",
            ThemeId::McpExtensibility,
            "Plugin install fails with HTTP 404 from marketplace. Blocks plugin ecosystem adoption.",
        ),
    ];

    rows.iter()
        .zip(1..)
        .map(|((numbers, theme, rationale), rank)| TopIssue {
            rank,
            issue_numbers: numbers.to_string(),
            theme: *theme,
            rationale: rationale.to_string(),
        })
        .collect()
}

/// Rank and rationale attached to a pinned issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopIssueInfo {
    pub rank: u32,
    pub rationale: String,
}

/// Primary issue number of each ranking entry -> rank and rationale
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopIssueMap {
    entries: HashMap<u64, TopIssueInfo>,
}

impl TopIssueMap {
    /// Only the first `#<digits>` of each entry is pinned; entries without one are skipped
    pub fn from_entries(entries: &[TopIssue]) -> Result<Self> {
        let primary = Regex::new(ISSUE_REFERENCE)?;
        let mut map = HashMap::new();

        for entry in entries {
            let number = primary
                .captures(&entry.issue_numbers)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<u64>().ok());

            match number {
                Some(number) => {
                    map.insert(
                        number,
                        TopIssueInfo {
                            rank: entry.rank,
                            rationale: entry.rationale.clone(),
                        },
                    );
                }
                None => log::warn!(
                    "Top issue rank {} has no issue number in {:?}",
                    entry.rank,
                    entry.issue_numbers
                ),
            }
        }

        Ok(Self { entries: map })
    }

    pub fn get(&self, number: u64) -> Option<&TopIssueInfo> {
        self.entries.get(&number)
    }

    pub fn contains(&self, number: u64) -> bool {
        self.entries.contains_key(&number)
    }

    pub fn rank_of(&self, number: u64) -> Option<u32> {
        self.entries.get(&number).map(|info| info.rank)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pinned numbers ordered by rank
    pub fn numbers_by_rank(&self) -> Vec<u64> {
        let mut numbers: Vec<(u32, u64)> = self
            .entries
            .iter()
            .map(|(number, info)| (info.rank, *number))
            .collect();
        numbers.sort();
        numbers.into_iter().map(|(_, number)| number).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_theme() {
        let catalog = ThemeCatalog::default();
        assert_eq!(catalog.named().len(), 7);
        assert_eq!(catalog.all().count(), 8);
        for id in ThemeId::ALL {
            assert_eq!(catalog.get(id).id, id);
        }
        assert_eq!(catalog.max_estimated_count(), 195);
    }

    #[test]
    fn test_volume_ratio() {
        let catalog = ThemeCatalog::default();
        let max = catalog.max_estimated_count();
        assert_eq!(catalog.get(ThemeId::CrossPlatform).volume_ratio(max), 1.0);
        assert_eq!(catalog.get(ThemeId::TerminalRendering).volume_ratio(0), 0.0);
    }

    #[test]
    fn test_top_issue_map_uses_primary_number_only() {
        let map = TopIssueMap::from_entries(&top_issues()).unwrap();
        assert_eq!(map.len(), 10);
        assert_eq!(map.rank_of(26913), Some(1));
        assert_eq!(map.rank_of(26400), Some(5));
        assert!(!map.contains(26245));
        assert_eq!(map.numbers_by_rank()[..3], [26913, 26911, 26481]);
    }

    #[test]
    fn test_entry_without_number_is_skipped() {
        let entries = vec![TopIssue {
            rank: 1,
            issue_numbers: "TBD".to_string(),
            theme: ThemeId::Other,
            rationale: String::new(),
        }];
        assert!(TopIssueMap::from_entries(&entries).unwrap().is_empty());
    }

    #[test]
    fn test_all_referenced_numbers() {
        let entries = top_issues();
        assert_eq!(entries[4].issue_numbers().unwrap(), vec![26400, 26245, 24571]);

        // Every reference the lookup pins is the first one the entry lists
        let map = TopIssueMap::from_entries(&entries).unwrap();
        for entry in &entries {
            let numbers = entry.issue_numbers().unwrap();
            assert_eq!(map.rank_of(numbers[0]), Some(entry.rank));
        }

        let odd = TopIssue {
            rank: 3,
            issue_numbers: "see #12a, #7 and #".to_string(),
            theme: ThemeId::Other,
            rationale: String::new(),
        };
        assert_eq!(odd.issue_numbers().unwrap(), vec![12, 7]);
    }

    #[test]
    fn test_user_stories() {
        let stories = user_stories();
        assert_eq!(stories.len(), 7);
        assert_eq!(stories[0].id, 1);
        assert!(stories[3].sentence().starts_with("As a Windows / WSL developer, I need"));
    }
}
