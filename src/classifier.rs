use crate::lexicon::{Lexicon, SignalWords};
use crate::types::{Priority, ThemeId};

/// Themes whose issues are always critical
const ALWAYS_CRITICAL: [ThemeId; 3] = [
    ThemeId::TerminalRendering,
    ThemeId::PermissionsSecurity,
    ThemeId::CrossPlatform,
];

/// Themes that default to high unless a critical signal escalates them
const DEFAULT_HIGH: [ThemeId; 4] = [
    ThemeId::MemoryPerformance,
    ThemeId::McpExtensibility,
    ThemeId::ContextAgents,
    ThemeId::AuthBilling,
];

/// Title and summary joined the way both classifiers read them
pub fn classification_text(title: &str, summary: &str) -> String {
    format!("{} {}", title, summary).to_lowercase()
}

/// Keyword-scored theme assignment
#[derive(Debug, Clone, Default)]
pub struct ThemeClassifier {
    lexicon: Lexicon,
}

impl ThemeClassifier {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Score every named theme against the text, in lexicon order
    pub fn scores(&self, title: &str, summary: &str) -> Vec<(ThemeId, u32)> {
        let text = classification_text(title, summary);
        self.lexicon
            .entries()
            .iter()
            .map(|entry| {
                let score = entry
                    .keywords
                    .iter()
                    .filter(|kw| text.contains(kw.phrase.as_str()))
                    .map(|kw| kw.weight)
                    .sum();
                (entry.theme, score)
            })
            .collect()
    }

    /// Highest-scoring theme; earliest wins ties, `Other` when nothing scores
    pub fn classify(&self, title: &str, summary: &str) -> ThemeId {
        let mut best_theme = ThemeId::Other;
        let mut best_score = 0;

        for (theme, score) in self.scores(title, summary) {
            if score > best_score {
                best_score = score;
                best_theme = theme;
            }
        }

        best_theme
    }
}

/// Rule cascade from theme plus signal words to a priority tier
#[derive(Debug, Clone, Default)]
pub struct PriorityClassifier {
    signals: SignalWords,
}

impl PriorityClassifier {
    pub fn new(signals: SignalWords) -> Self {
        Self { signals }
    }

    pub fn classify(&self, theme: ThemeId, title: &str, summary: &str) -> Priority {
        if ALWAYS_CRITICAL.contains(&theme) {
            return Priority::P0;
        }

        let text = classification_text(title, summary);

        if contains_any(&text, &self.signals.critical) {
            return Priority::P0;
        }

        if DEFAULT_HIGH.contains(&theme) {
            return Priority::P1;
        }

        if contains_any(&text, &self.signals.high) {
            return Priority::P1;
        }

        Priority::P2
    }
}

fn contains_any(text: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| text.contains(needle.as_str()))
}

/// Both classifiers, configured from one lexicon
#[derive(Debug, Clone, Default)]
pub struct IssueClassifier {
    theme: ThemeClassifier,
    priority: PriorityClassifier,
}

impl IssueClassifier {
    pub fn new(lexicon: Lexicon) -> Self {
        let priority = PriorityClassifier::new(lexicon.signals().clone());
        Self {
            theme: ThemeClassifier::new(lexicon),
            priority,
        }
    }

    pub fn theme_classifier(&self) -> &ThemeClassifier {
        &self.theme
    }

    /// Theme first, then priority, since priority depends on theme
    pub fn classify(&self, title: &str, summary: &str) -> (ThemeId, Priority) {
        let theme = self.theme.classify(title, summary);
        let priority = self.priority.classify(theme, title, summary);
        (theme, priority)
    }
}
