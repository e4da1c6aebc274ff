use issue_triage::catalog::{top_issues, TopIssue, TopIssueMap};
use issue_triage::loader::load_raw_issues;
use issue_triage::prelude::*;
use issue_triage::{enrich_issues, Lexicon, PriorityClassifier, SignalWords, ThemeClassifier};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn fixture_issues() -> Vec<Issue> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("issues.jsonl");
    let raw = load_raw_issues(path).expect("fixture should load");
    enrich_issues(&raw, &IssueClassifier::default())
}

fn issue(number: u64, theme: ThemeId, priority: Priority, state: IssueState) -> Issue {
    Issue {
        number,
        title: format!("Issue number {}", number),
        state,
        created_at: "2026-02-01".to_string(),
        closed_at: None,
        author: format!("author{}", number),
        url: String::new(),
        summary: String::new(),
        theme,
        priority,
    }
}

fn numbers(rows: &[&Issue]) -> Vec<u64> {
    rows.iter().map(|issue| issue.number).collect()
}

fn ranked(entries: &[(u32, &str)]) -> TopIssueMap {
    let entries: Vec<TopIssue> = entries
        .iter()
        .map(|(rank, numbers)| TopIssue {
            rank: *rank,
            issue_numbers: numbers.to_string(),
            theme: ThemeId::Other,
            rationale: format!("rank {}", rank),
        })
        .collect();
    TopIssueMap::from_entries(&entries).unwrap()
}

#[test]
fn every_issue_gets_one_theme_and_priority() {
    let issues = fixture_issues();
    assert_eq!(issues.len(), 14);
    for issue in &issues {
        assert!(ThemeId::ALL.contains(&issue.theme));
        assert!(Priority::ALL.contains(&issue.priority));
    }
}

#[test]
fn classification_is_deterministic() {
    let classifier = IssueClassifier::default();
    for issue in fixture_issues() {
        let first = classifier.classify(&issue.title, &issue.summary);
        let second = classifier.classify(&issue.title, &issue.summary);
        assert_eq!(first, second);
        assert_eq!(first, (issue.theme, issue.priority));
    }
}

#[test]
fn mandated_themes_are_always_p0() {
    let priority = PriorityClassifier::default();
    for theme in [
        ThemeId::TerminalRendering,
        ThemeId::PermissionsSecurity,
        ThemeId::CrossPlatform,
    ] {
        assert_eq!(priority.classify(theme, "minor typo", ""), Priority::P0);
        assert_eq!(priority.classify(theme, "", ""), Priority::P0);
    }
}

#[test]
fn critical_signal_escalates_memory_performance() {
    let priority = PriorityClassifier::default();
    assert_eq!(
        priority.classify(ThemeId::MemoryPerformance, "App crash after an hour", ""),
        Priority::P0
    );
    assert_eq!(
        priority.classify(ThemeId::MemoryPerformance, "Gets slow after an hour", ""),
        Priority::P1
    );
}

#[test]
fn ties_go_to_the_earlier_declared_theme() {
    // "login" scores auth-billing 1, "flicker" scores terminal-rendering 1
    let classifier = ThemeClassifier::default();
    assert_eq!(
        classifier.classify("login flicker", ""),
        ThemeId::TerminalRendering
    );

    let forward = Lexicon::new(
        vec![
            (ThemeId::AuthBilling, vec!["alpha".to_string()]),
            (ThemeId::TerminalRendering, vec!["beta".to_string()]),
        ],
        SignalWords::default(),
    )
    .unwrap();
    let reversed = Lexicon::new(
        vec![
            (ThemeId::TerminalRendering, vec!["beta".to_string()]),
            (ThemeId::AuthBilling, vec!["alpha".to_string()]),
        ],
        SignalWords::default(),
    )
    .unwrap();

    assert_eq!(
        ThemeClassifier::new(forward).classify("alpha", "beta"),
        ThemeId::AuthBilling
    );
    assert_eq!(
        ThemeClassifier::new(reversed).classify("alpha", "beta"),
        ThemeId::TerminalRendering
    );
}

#[test]
fn nothing_scoring_falls_back_to_other() {
    let lexicon = Lexicon::new(
        vec![(ThemeId::AuthBilling, vec!["alpha".to_string()])],
        SignalWords::default(),
    )
    .unwrap();
    let classifier = IssueClassifier::new(lexicon);
    assert_eq!(
        classifier.classify("gamma", "delta"),
        (ThemeId::Other, Priority::P2)
    );
}

#[test]
fn filters_compose_by_conjunction() {
    let issues = vec![
        issue(1, ThemeId::CrossPlatform, Priority::P0, IssueState::Open),
        issue(2, ThemeId::AuthBilling, Priority::P1, IssueState::Closed),
        issue(3, ThemeId::CrossPlatform, Priority::P2, IssueState::Open),
    ];
    let view = ViewState::new()
        .with_theme(ThemeId::CrossPlatform)
        .with_state(IssueState::Open)
        .with_priority(Priority::P0);

    let rows = IssuePipeline::default().apply(&issues, &view);
    assert_eq!(numbers(&rows), vec![1]);

    let view = ViewState::new()
        .with_theme(ThemeId::CrossPlatform)
        .with_state(IssueState::Open);
    let rows = IssuePipeline::default().apply(&issues, &view);
    assert_eq!(numbers(&rows), vec![3, 1]);
}

#[test]
fn default_view_pins_and_any_filter_suppresses_pinning() {
    let issues = vec![
        issue(10, ThemeId::Other, Priority::P2, IssueState::Open),
        issue(20, ThemeId::Other, Priority::P2, IssueState::Open),
        issue(30, ThemeId::Other, Priority::P2, IssueState::Open),
        issue(40, ThemeId::Other, Priority::P2, IssueState::Open),
    ];
    let pipeline = IssuePipeline::new(ranked(&[(1, "#30"), (2, "#10 + #40")]));

    let rows = pipeline.apply(&issues, &ViewState::default());
    let order: Vec<String> = numbers(&rows).iter().map(u64::to_string).collect();
    insta::assert_snapshot!(order.join(","), @"30,10,40,20");

    // Matches every issue, but still counts as an active filter
    let filtered = ViewState::default().with_state(IssueState::Open);
    let rows = pipeline.apply(&issues, &filtered);
    assert_eq!(numbers(&rows), vec![40, 30, 20, 10]);
}

#[test]
fn curated_ranking_is_pinned_on_the_fixture() {
    let issues = fixture_issues();
    let pipeline = IssuePipeline::new(TopIssueMap::from_entries(&top_issues()).unwrap());

    let rows = pipeline.apply(&issues, &ViewState::default());
    assert_eq!(
        numbers(&rows),
        vec![
            26913, 26911, 26481, 26850, 26400, 25685, 26805, 26912, 24960, 26951, 27002, 27001,
            26245, 0,
        ]
    );
}

#[test]
fn priority_sort_is_stable() {
    let issues = vec![
        issue(4, ThemeId::Other, Priority::P1, IssueState::Open),
        issue(9, ThemeId::Other, Priority::P2, IssueState::Open),
        issue(2, ThemeId::Other, Priority::P1, IssueState::Open),
        issue(7, ThemeId::Other, Priority::P0, IssueState::Open),
        issue(1, ThemeId::Other, Priority::P1, IssueState::Open),
        issue(8, ThemeId::Other, Priority::P1, IssueState::Open),
    ];
    let mut rows: Vec<&Issue> = issues.iter().collect();
    issue_triage::pipeline::sort_issues(&mut rows, SortField::Priority, SortOrder::Ascending);

    assert_eq!(numbers(&rows), vec![7, 4, 2, 1, 8, 9]);
}

#[test]
fn search_matches_author_alone() {
    let issues = fixture_issues();
    let view = ViewState::default().with_search("ZED");
    let rows = IssuePipeline::default().apply(&issues, &view);
    assert_eq!(numbers(&rows), vec![27001]);
}

#[test]
fn search_matches_issue_number_substring() {
    let issues = fixture_issues();
    let view = ViewState::default().with_search("2691");
    let rows = IssuePipeline::default().apply(&issues, &view);
    assert_eq!(numbers(&rows), vec![26913, 26912, 26911]);
}

#[test]
fn zero_numbered_issue_is_surfaced() {
    let issues = fixture_issues();
    let broken: Vec<&Issue> = issues.iter().filter(|i| !i.has_valid_number()).collect();
    assert_eq!(broken.len(), 1);
    assert_eq!(broken[0].title, "Row with a broken number");
}
