use crate::error::{Error, Result};
use crate::types::{IssueState, Priority, ThemeId};
use std::fmt;
use std::str::FromStr;

/// Sort direction for the issue table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

impl From<&str> for SortOrder {
    fn from(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "ASC" => SortOrder::Ascending,
            _ => SortOrder::Descending,
        }
    }
}

/// Column the table is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Number,
    Title,
    Theme,
    Priority,
    State,
    CreatedAt,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Number => "number",
            SortField::Title => "title",
            SortField::Theme => "theme",
            SortField::Priority => "priority",
            SortField::State => "state",
            SortField::CreatedAt => "createdAt",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "number" => Ok(SortField::Number),
            "title" => Ok(SortField::Title),
            "theme" => Ok(SortField::Theme),
            "priority" => Ok(SortField::Priority),
            "state" => Ok(SortField::State),
            "createdAt" | "created_at" | "created" => Ok(SortField::CreatedAt),
            _ => Err(Error::UnknownSortField(s.to_string())),
        }
    }
}

/// Parse an optional selector where `all` or an empty string means no filter
pub fn parse_selector<T>(s: &str) -> Result<Option<T>>
where
    T: FromStr<Err = Error>,
{
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}

/// Search, filter, sort and page selection for the issue table.
///
/// Every setter that changes what is shown resets the page to 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    search: String,
    theme: Option<ThemeId>,
    priority: Option<Priority>,
    state: Option<IssueState>,
    sort_field: SortField,
    sort_order: SortOrder,
    page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            theme: None,
            priority: None,
            state: None,
            sort_field: SortField::Number,
            sort_order: SortOrder::Descending,
            page: 0,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn theme(&self) -> Option<ThemeId> {
        self.theme
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    pub fn state(&self) -> Option<IssueState> {
        self.state
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// True when search text or any selector narrows the collection
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty()
            || self.theme.is_some()
            || self.priority.is_some()
            || self.state.is_some()
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 0;
    }

    pub fn set_theme(&mut self, theme: Option<ThemeId>) {
        self.theme = theme;
        self.page = 0;
    }

    pub fn set_priority(&mut self, priority: Option<Priority>) {
        self.priority = priority;
        self.page = 0;
    }

    pub fn set_state(&mut self, state: Option<IssueState>) {
        self.state = state;
        self.page = 0;
    }

    pub fn set_sort(&mut self, field: SortField, order: SortOrder) {
        self.sort_field = field;
        self.sort_order = order;
        self.page = 0;
    }

    /// Column-header click: flip direction on the current field, else select it ascending
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_field = field;
            self.sort_order = SortOrder::Ascending;
        }
        self.page = 0;
    }

    /// Jump to `page`, clamped to the last page
    pub fn set_page(&mut self, page: usize, total_pages: usize) {
        self.page = page.min(total_pages.saturating_sub(1));
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.set_page(self.page + 1, total_pages);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.set_search(search);
        self
    }

    pub fn with_theme(mut self, theme: ThemeId) -> Self {
        self.set_theme(Some(theme));
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.set_priority(Some(priority));
        self
    }

    pub fn with_state(mut self, state: IssueState) -> Self {
        self.set_state(Some(state));
        self
    }

    pub fn with_sort(mut self, field: SortField, order: SortOrder) -> Self {
        self.set_sort(field, order);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}
