use crate::error::{Error, Result};
use crate::types::ThemeId;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// A lowercased trigger and the score it contributes when present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub phrase: String,
    pub weight: u32,
}

impl Keyword {
    /// Single tokens weigh 1, multi-word phrases weigh 2. Surrounding whitespace is dropped.
    pub fn new(phrase: &str) -> Self {
        let phrase = phrase.trim().to_lowercase();
        let weight = if phrase.contains(' ') { 2 } else { 1 };
        Self { phrase, weight }
    }
}

/// Keyword list for one named theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeKeywords {
    pub theme: ThemeId,
    pub keywords: Vec<Keyword>,
}

/// Phrase sets that move priority independently of theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalWords {
    pub critical: Vec<String>,
    pub high: Vec<String>,
}

impl Default for SignalWords {
    fn default() -> Self {
        Self {
            critical: lowercase_all(CRITICAL_SIGNALS),
            high: lowercase_all(HIGH_SIGNALS),
        }
    }
}

/// Ordered theme -> keyword table. Declaration order is the tie-break order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    entries: Vec<ThemeKeywords>,
    signals: SignalWords,
}

impl Lexicon {
    /// Build a lexicon from ordered (theme, keywords) pairs
    pub fn new(entries: Vec<(ThemeId, Vec<String>)>, signals: SignalWords) -> Result<Self> {
        check_signals("critical", &signals.critical)?;
        check_signals("high", &signals.high)?;

        let mut seen = HashSet::new();
        let mut built = Vec::with_capacity(entries.len());

        for (theme, keywords) in entries {
            if theme == ThemeId::Other {
                return Err(Error::InvalidLexicon(
                    "the catch-all theme 'other' cannot carry keywords".to_string(),
                ));
            }
            if !seen.insert(theme) {
                return Err(Error::InvalidLexicon(format!(
                    "theme '{}' is declared more than once",
                    theme
                )));
            }
            if let Some(blank) = keywords.iter().find(|k| k.trim().is_empty()) {
                return Err(Error::InvalidLexicon(format!(
                    "theme '{}' has a blank keyword {:?}",
                    theme, blank
                )));
            }
            built.push(ThemeKeywords {
                theme,
                keywords: keywords.iter().map(|k| Keyword::new(k)).collect(),
            });
        }

        Ok(Self {
            entries: built,
            signals,
        })
    }

    pub fn entries(&self) -> &[ThemeKeywords] {
        &self.entries
    }

    pub fn signals(&self) -> &SignalWords {
        &self.signals
    }

    pub fn keywords_for(&self, theme: ThemeId) -> Option<&[Keyword]> {
        self.entries
            .iter()
            .find(|entry| entry.theme == theme)
            .map(|entry| entry.keywords.as_slice())
    }

    /// Parse a YAML override document
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let raw: RawLexiconConfig = serde_yaml::from_str(contents)?;

        let mut entries = Vec::with_capacity(raw.themes.len());
        for raw_theme in raw.themes {
            let theme = raw_theme
                .id
                .parse::<ThemeId>()
                .map_err(|_| Error::InvalidLexicon(format!("unknown theme id '{}'", raw_theme.id)))?;
            entries.push((theme, raw_theme.keywords));
        }

        let defaults = SignalWords::default();
        let signals = SignalWords {
            critical: raw
                .critical_signals
                .map(|words| lowercase_all(&words))
                .unwrap_or(defaults.critical),
            high: raw
                .high_signals
                .map(|words| lowercase_all(&words))
                .unwrap_or(defaults.high),
        };

        Self::new(entries, signals)
    }

    /// Load a YAML override file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let lexicon = Self::from_yaml_str(&contents)?;
        log::debug!(
            "Loaded lexicon with {} themes from {}",
            lexicon.entries.len(),
            path.as_ref().display()
        );
        Ok(lexicon)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        let entries = DEFAULT_THEME_KEYWORDS
            .iter()
            .map(|(theme, keywords)| ThemeKeywords {
                theme: *theme,
                keywords: keywords.iter().map(|k| Keyword::new(k)).collect(),
            })
            .collect();
        Self {
            entries,
            signals: SignalWords::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawThemeKeywords {
    id: String,
    #[serde(default)]
    keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawLexiconConfig {
    themes: Vec<RawThemeKeywords>,
    #[serde(default)]
    critical_signals: Option<Vec<String>>,
    #[serde(default)]
    high_signals: Option<Vec<String>>,
}

fn lowercase_all<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    words.iter().map(|w| w.as_ref().trim().to_lowercase()).collect()
}

/// A blank signal matches every text
fn check_signals(tier: &str, words: &[String]) -> Result<()> {
    match words.iter().find(|w| w.trim().is_empty()) {
        Some(blank) => Err(Error::InvalidLexicon(format!(
            "{} signals contain a blank entry {:?}",
            tier, blank
        ))),
        None => Ok(()),
    }
}

const CRITICAL_SIGNALS: &[&str] = &[
    "crash",
    "data loss",
    "rm -rf",
    "security",
    "unusable",
    "show-stopper",
    "critical",
    "breaking",
    "blocker",
    "kernel panic",
    "sigkill",
    "destructive",
];

const HIGH_SIGNALS: &[&str] = &["bug", "fail", "error", "broken", "not work", "regression"];

const DEFAULT_THEME_KEYWORDS: &[(ThemeId, &[&str])] = &[
    (
        ThemeId::TerminalRendering,
        &[
            "flicker",
            "scroll",
            "render",
            "display",
            "blank screen",
            "cursor",
            "terminal",
            "ui",
            "tui",
            "layout",
            "text corrupt",
            "screen",
            "iterm",
            "tmux",
            "visual",
            "font",
            "spacing",
            "ink",
            "jitter",
            "blink",
            "garble",
            "artifact",
            "refresh",
            "redraw",
            "rendering",
            "vim mode",
            "input area",
            "chat history",
            "keystroke",
            "copy",
            "markdown output",
            "background color",
            "chalk",
            "react #185",
            "setstate loop",
            "re-render",
        ],
    ),
    (
        ThemeId::PermissionsSecurity,
        &[
            "permission",
            "allow",
            "deny",
            "sandbox",
            "rm -rf",
            "security",
            "consent",
            "trust",
            "glob pattern",
            "settings.local",
            "allowlist",
            "denylist",
            "CLAUDE.md",
            "mandatory rule",
            "excludedCommands",
            ".env",
            "secret",
            "credential",
            "dangerous",
            "destructive",
            "directory traversal",
            "symlink attack",
        ],
    ),
    (
        ThemeId::MemoryPerformance,
        &[
            "memory leak",
            "heap",
            "oom",
            "out of memory",
            "ram",
            "cpu",
            "performance",
            "slow",
            "freeze",
            "crash",
            "hang",
            "unresponsive",
            "degrad",
            "100%",
            "busy-poll",
            "resource",
            "idle",
            "javascript heap",
            "sigkill",
            "kernel panic",
            "jetsam",
            "537 gb",
            "output files",
            "bun runtime",
            "bun crash",
        ],
    ),
    (
        ThemeId::CrossPlatform,
        &[
            "windows",
            "wsl",
            "linux",
            "crlf",
            "line ending",
            "cmd.exe",
            "powershell",
            "mingw",
            "msys",
            "git bash",
            "nul device",
            "shift+enter",
            "platform",
            "hpc",
            "termux",
            "devcontainer",
            "arm64",
            "aarch64",
            "onecmd",
            "enterprise ad",
            "username contains",
            "cowork",
            "desktop vm",
            "hyper-v",
            "gvisor",
            "vm boot",
            "vm kernel",
            "vm crash",
            "vm network",
            "ghost nat",
            "plan9 mount",
            "sandbox vm",
            "container binar",
            "sigill",
        ],
    ),
    (
        ThemeId::McpExtensibility,
        &[
            "mcp server",
            "mcp tool",
            "model context protocol",
            "mcp connect",
            "mcp oauth",
            "orphan process",
            "tool not available",
            "tools not exposed",
            "dynamic client",
            "token refresh",
            "outputschema",
            "double-stringif",
            "parameter serializ",
            "hook",
            "plugin",
            "marketplace",
            "skill",
            "pretooluse",
            "posttooluse",
            "sessionstart",
            "plugin install",
            "plugin 404",
            "extension install",
            "enabledplugins",
            "plugin-dir",
            "lsp",
            "language server",
        ],
    ),
    (
        ThemeId::ContextAgents,
        &[
            "compact",
            "compaction",
            "context low",
            "auto-compact",
            "conversation state",
            "tool_use",
            "tool_result",
            "erased",
            "forgotten",
            "lost context",
            "corrupt",
            "prompt is too long",
            "context window",
            "context exhaust",
            "plan lost",
            "plan resurface",
            "agent team",
            "subagent",
            "sub-agent",
            "teammate",
            "classifyhandoff",
            "inboxpoller",
            "sendmessage",
            "handoff",
            "multi-agent",
            "team lead",
            "sibling tool",
            "agent spawn",
            "hallucin",
            "model regress",
            "opus 4.6",
            "sonnet 4.6",
            "model quality",
            "wrong answer",
            "fabricat",
            "ignores instruction",
            "tool-use avoidance",
            "guesses instead",
            "exploration loop",
            "confabul",
            "sloppy work",
            "confident wrong",
        ],
    ),
    (
        ThemeId::AuthBilling,
        &[
            "auth",
            "login",
            "oauth",
            "re-auth",
            "401",
            "session-index",
            "sessions-index",
            "resume",
            "session lost",
            "session history",
            "workspace",
            "expire",
            "token expir",
            "rate limit",
            "usage limit",
            "billing",
            "quota",
            "limit reached",
            "usage metric",
            "5-hour",
            "weekly limit",
            "session limit",
            "overcharg",
            "usage discrepancy",
            "max plan",
            "pro plan",
            "fast burnout",
            "token consumption",
        ],
    ),
];
