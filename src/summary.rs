use crate::catalog::{Theme, ThemeCatalog};
use crate::types::{Issue, Priority, ThemeId};
use serde::Serialize;

/// Headline counts shown on the summary cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IssueSummary {
    pub total: usize,
    pub p0: usize,
    pub p1: usize,
    pub p2: usize,
    pub open: usize,
    pub closed: usize,
}

impl IssueSummary {
    pub fn from_issues(issues: &[Issue]) -> Self {
        issues.iter().fold(Self::default(), |mut acc, issue| {
            acc.total += 1;
            match issue.priority {
                Priority::P0 => acc.p0 += 1,
                Priority::P1 => acc.p1 += 1,
                Priority::P2 => acc.p2 += 1,
            }
            if issue.is_open() {
                acc.open += 1;
            } else {
                acc.closed += 1;
            }
            acc
        })
    }

    pub fn count_for(&self, priority: Priority) -> usize {
        match priority {
            Priority::P0 => self.p0,
            Priority::P1 => self.p1,
            Priority::P2 => self.p2,
        }
    }
}

/// Live per-theme tally from the classifier, every theme listed, catch-all last
pub fn theme_counts(issues: &[Issue]) -> Vec<(ThemeId, usize)> {
    ThemeId::ALL
        .iter()
        .map(|&theme| (theme, issues.iter().filter(|i| i.theme == theme).count()))
        .collect()
}

/// Catalog metadata next to the live count for one theme.
///
/// `theme.estimated_count` and `live_count` come from different sources and may disagree.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeOverview<'a> {
    #[serde(flatten)]
    pub theme: &'a Theme,
    pub live_count: usize,
    pub volume_ratio: f64,
}

pub fn theme_overview<'a>(catalog: &'a ThemeCatalog, issues: &[Issue]) -> Vec<ThemeOverview<'a>> {
    let max = catalog.max_estimated_count();
    let counts = theme_counts(issues);

    catalog
        .all()
        .map(|theme| ThemeOverview {
            theme,
            live_count: counts
                .iter()
                .find(|(id, _)| *id == theme.id)
                .map_or(0, |(_, count)| *count),
            volume_ratio: theme.volume_ratio(max),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IssueState;

    fn issue(theme: ThemeId, priority: Priority, state: IssueState) -> Issue {
        Issue {
            number: 1,
            title: String::new(),
            state,
            created_at: String::new(),
            closed_at: None,
            author: String::new(),
            url: String::new(),
            summary: String::new(),
            theme,
            priority,
        }
    }

    #[test]
    fn test_summary_counts() {
        let issues = vec![
            issue(ThemeId::CrossPlatform, Priority::P0, IssueState::Open),
            issue(ThemeId::AuthBilling, Priority::P1, IssueState::Closed),
            issue(ThemeId::Other, Priority::P2, IssueState::Open),
            issue(ThemeId::Other, Priority::P2, IssueState::Open),
        ];
        let summary = IssueSummary::from_issues(&issues);
        assert_eq!(
            summary,
            IssueSummary {
                total: 4,
                p0: 1,
                p1: 1,
                p2: 2,
                open: 3,
                closed: 1,
            }
        );
        assert_eq!(summary.count_for(Priority::P2), 2);
    }

    #[test]
    fn test_live_counts_do_not_touch_estimates() {
        let issues = vec![issue(ThemeId::CrossPlatform, Priority::P0, IssueState::Open)];
        let catalog = ThemeCatalog::default();
        let overview = theme_overview(&catalog, &issues);

        assert_eq!(overview.len(), 8);
        let cross = overview
            .iter()
            .find(|row| row.theme.id == ThemeId::CrossPlatform)
            .unwrap();
        assert_eq!(cross.live_count, 1);
        assert_eq!(cross.theme.estimated_count, 195);
        assert_eq!(overview.last().map(|row| row.theme.id), Some(ThemeId::Other));
    }

    #[test]
    fn test_theme_counts_cover_all_themes() {
        let counts = theme_counts(&[]);
        assert_eq!(counts.len(), 8);
        assert!(counts.iter().all(|(_, count)| *count == 0));
    }
}
