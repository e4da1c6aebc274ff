use crate::error::{Error, Result};
use crate::lexicon::Lexicon;
use crate::pipeline::PAGE_SIZE;
use std::path::{Path, PathBuf};

/// Configuration for a dashboard session
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub lexicon_path: Option<PathBuf>,
    pub page_size: usize,
}

impl Config {
    /// Create a new default configuration
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            lexicon_path: None,
            page_size: PAGE_SIZE,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        check_file("Issue batch", &self.data_path)?;

        if let Some(lexicon_path) = &self.lexicon_path {
            check_file("Lexicon file", lexicon_path)?;
        }

        if self.page_size == 0 {
            return Err(Error::Config("Page size must be at least 1".to_string()));
        }

        Ok(())
    }

    /// The configured lexicon override, or the built-in one
    pub fn lexicon(&self) -> Result<Lexicon> {
        match &self.lexicon_path {
            Some(path) => Lexicon::load(path),
            None => Ok(Lexicon::default()),
        }
    }
}

fn check_file(what: &str, path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::Config(format!(
            "{} does not exist: {}",
            what,
            path.display()
        )));
    }

    if !path.is_file() {
        return Err(Error::Config(format!(
            "{} is not a file: {}",
            what,
            path.display()
        )));
    }

    Ok(())
}

/// Builder for creating configurations
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default settings
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            config: Config::new(data_path),
        }
    }

    /// Set the issue batch path
    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_path = path.into();
        self
    }

    /// Use a YAML lexicon instead of the built-in one
    pub fn lexicon_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.lexicon_path = Some(path.into());
        self
    }

    /// Set the rows per page
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.config.page_size = page_size;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_data_file_is_rejected() {
        let result = ConfigBuilder::new("/definitely/not/here.jsonl").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigBuilder::new(dir.path()).build();
        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("not a file")));
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = ConfigBuilder::new(file.path()).page_size(0).build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = ConfigBuilder::new(file.path()).build().unwrap();
        assert_eq!(config.page_size, PAGE_SIZE);
        assert!(config.lexicon_path.is_none());
        assert_eq!(config.lexicon().unwrap(), Lexicon::default());
    }
}
