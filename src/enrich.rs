use crate::classifier::IssueClassifier;
use crate::types::{Issue, IssueState, RawIssue};

/// Parse the leading decimal digits of a source number.
///
/// Leading whitespace is skipped and anything after the digits is ignored.
/// Returns 0 when there are no leading digits.
pub fn parse_issue_number(raw: &str) -> u64 {
    let trimmed = raw.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: &str = match trimmed.find(|c: char| !c.is_ascii_digit()) {
        Some(end) => &trimmed[..end],
        None => trimmed,
    };
    digits.parse().unwrap_or(0)
}

/// Turn one raw record into a classified issue
pub fn enrich_issue(raw: &RawIssue, classifier: &IssueClassifier) -> Issue {
    let title = raw.title.clone().unwrap_or_default();
    let summary = raw.ai_summary.clone().unwrap_or_default();
    let (theme, priority) = classifier.classify(&title, &summary);

    Issue {
        number: raw.number.as_deref().map(parse_issue_number).unwrap_or(0),
        title,
        state: IssueState::from_raw(raw.state.as_deref().unwrap_or_default()),
        created_at: raw.created_at.clone().unwrap_or_default(),
        closed_at: raw.closed_at.clone().filter(|s| !s.is_empty()),
        author: raw.author.clone().unwrap_or_default(),
        url: raw.url.clone().unwrap_or_default(),
        summary,
        theme,
        priority,
    }
}

/// Enrich a whole batch, preserving input order
pub fn enrich_issues(raw: &[RawIssue], classifier: &IssueClassifier) -> Vec<Issue> {
    let issues: Vec<Issue> = raw
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let issue = enrich_issue(record, classifier);
            if !issue.has_valid_number() {
                log::warn!(
                    "Record {} has unparsable issue number {:?}; kept as #0",
                    idx,
                    record.number.as_deref().unwrap_or("")
                );
            }
            issue
        })
        .collect();

    log::debug!("Enriched {} issues", issues.len());
    issues
}
