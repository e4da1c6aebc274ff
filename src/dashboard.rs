use crate::catalog::{self, ThemeCatalog, TopIssueMap};
use crate::classifier::IssueClassifier;
use crate::config::Config;
use crate::enrich::enrich_issues;
use crate::error::Result;
use crate::loader::load_raw_issues;
use crate::pipeline::{IssuePipeline, Page};
use crate::summary::{theme_overview, IssueSummary, ThemeOverview};
use crate::types::{Issue, RawIssue};
use crate::view::ViewState;

/// An enriched issue collection with the tables and pipeline that read it.
///
/// The collection is built once and only borrowed afterwards.
pub struct Dashboard {
    issues: Vec<Issue>,
    catalog: ThemeCatalog,
    pipeline: IssuePipeline,
    page_size: usize,
}

impl Dashboard {
    /// Enrich `raw` with `classifier` and attach the built-in catalog and ranking
    pub fn new(raw: &[RawIssue], classifier: &IssueClassifier, page_size: usize) -> Result<Self> {
        let top = TopIssueMap::from_entries(&catalog::top_issues())?;
        Ok(Self {
            issues: enrich_issues(raw, classifier),
            catalog: ThemeCatalog::default(),
            pipeline: IssuePipeline::new(top),
            page_size,
        })
    }

    /// Load the configured batch and lexicon
    pub fn from_config(config: &Config) -> Result<Self> {
        let classifier = IssueClassifier::new(config.lexicon()?);
        let raw = load_raw_issues(&config.data_path)?;
        Self::new(&raw, &classifier, config.page_size)
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn summary(&self) -> IssueSummary {
        IssueSummary::from_issues(&self.issues)
    }

    pub fn themes(&self) -> Vec<ThemeOverview<'_>> {
        theme_overview(&self.catalog, &self.issues)
    }

    pub fn page(&self, view: &ViewState) -> Page<'_> {
        self.pipeline.page(&self.issues, view, self.page_size)
    }
}
