//! Filter, sort and pin pipeline behind the issue table.
//!
//! Everything here is a pure recomputation from the issue collection and a
//! [`ViewState`]; the collection is only ever borrowed.

use crate::catalog::TopIssueMap;
use crate::types::Issue;
use crate::view::{SortField, SortOrder, ViewState};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;

/// Rows per table page
pub const PAGE_SIZE: usize = 25;

/// Parse a creation timestamp. RFC 3339, `YYYY-MM-DD HH:MM:SS` and bare dates are accepted.
pub fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn matches_search(issue: &Issue, query: &str) -> bool {
    issue.title.to_lowercase().contains(query)
        || issue.summary.to_lowercase().contains(query)
        || issue.author.to_lowercase().contains(query)
        || issue.number.to_string().contains(query)
}

/// Apply search, then theme, priority and state filters (conjunction)
pub fn filter_issues<'a>(issues: &'a [Issue], view: &ViewState) -> Vec<&'a Issue> {
    let query = view.search().to_lowercase();

    issues
        .iter()
        .filter(|issue| query.is_empty() || matches_search(issue, &query))
        .filter(|issue| view.theme().map_or(true, |theme| issue.theme == theme))
        .filter(|issue| {
            view.priority()
                .map_or(true, |priority| issue.priority == priority)
        })
        .filter(|issue| view.state().map_or(true, |state| issue.state == state))
        .collect()
}

fn compare_by(field: SortField, a: &Issue, b: &Issue) -> Ordering {
    match field {
        SortField::Number => a.number.cmp(&b.number),
        SortField::Title => a.title.cmp(&b.title),
        SortField::Theme => a.theme.as_str().cmp(b.theme.as_str()),
        SortField::Priority => a.priority.cmp(&b.priority),
        SortField::State => a.state.as_str().cmp(b.state.as_str()),
        SortField::CreatedAt => parse_created_at(&a.created_at).cmp(&parse_created_at(&b.created_at)),
    }
}

/// Stable sort; equal rows keep their prior relative order in both directions
pub fn sort_issues(rows: &mut [&Issue], field: SortField, order: SortOrder) {
    rows.sort_by(|a, b| {
        let cmp = compare_by(field, a, b);
        match order {
            SortOrder::Ascending => cmp,
            SortOrder::Descending => cmp.reverse(),
        }
    });
}

/// Move curated issues to the front in rank order, keeping the rest as sorted
pub fn pin_top_issues<'a>(sorted: Vec<&'a Issue>, top: &TopIssueMap) -> Vec<&'a Issue> {
    let (mut pinned, rest): (Vec<&Issue>, Vec<&Issue>) = sorted
        .into_iter()
        .partition(|issue| top.contains(issue.number));

    pinned.sort_by_key(|issue| top.rank_of(issue.number).unwrap_or(u32::MAX));
    pinned.extend(rest);
    pinned
}

/// One table row ready for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row<'a> {
    #[serde(flatten)]
    pub issue: &'a Issue,
    pub pinned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    /// Curated rationale for pinned issues, otherwise the summary
    pub caption: &'a str,
    /// Last pinned row directly followed by an unpinned one, default view only
    pub divider_after: bool,
}

/// A page of rows plus the paging counters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a> {
    pub rows: Vec<Row<'a>>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

/// Number of pages needed for `len` rows
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Slice out page `page`, clamped into range. Returns the slice and the effective page.
pub fn paginate<T>(rows: &[T], page: usize, page_size: usize) -> (&[T], usize) {
    let page_size = page_size.max(1);
    let total_pages = page_count(rows.len(), page_size);
    let page = page.min(total_pages.saturating_sub(1));
    let start = (page * page_size).min(rows.len());
    let end = (start + page_size).min(rows.len());
    (&rows[start..end], page)
}

/// The table pipeline, configured with the curated top-issue lookup
#[derive(Debug, Clone, Default)]
pub struct IssuePipeline {
    top: TopIssueMap,
}

impl IssuePipeline {
    pub fn new(top: TopIssueMap) -> Self {
        Self { top }
    }

    pub fn top_issues(&self) -> &TopIssueMap {
        &self.top
    }

    /// Ordered rows to display, before pagination
    pub fn apply<'a>(&self, issues: &'a [Issue], view: &ViewState) -> Vec<&'a Issue> {
        let mut rows = filter_issues(issues, view);
        sort_issues(&mut rows, view.sort_field(), view.sort_order());

        if view.has_active_filters() {
            log::debug!("Filters active; {} rows in plain sorted order", rows.len());
            return rows;
        }

        log::debug!("Default view; pinning top issues ahead of {} rows", rows.len());
        pin_top_issues(rows, &self.top)
    }

    /// Apply the view and cut out its page of display rows
    pub fn page<'a>(&'a self, issues: &'a [Issue], view: &ViewState, page_size: usize) -> Page<'a> {
        let ordered = self.apply(issues, view);
        let (slice, page) = paginate(&ordered, view.page(), page_size);
        let show_dividers = !view.has_active_filters();

        let rows = slice
            .iter()
            .enumerate()
            .map(|(idx, &issue)| {
                let info = self.top.get(issue.number);
                let next_unpinned = slice
                    .get(idx + 1)
                    .map_or(false, |next| !self.top.contains(next.number));
                Row {
                    issue,
                    pinned: info.is_some(),
                    rank: info.map(|i| i.rank),
                    caption: info.map_or(issue.summary.as_str(), |i| i.rationale.as_str()),
                    divider_after: show_dividers && info.is_some() && next_unpinned,
                }
            })
            .collect();

        Page {
            rows,
            page,
            total_pages: page_count(ordered.len(), page_size),
            total_matches: ordered.len(),
        }
    }
}
