use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::error::{FinderError, Result};
use crate::filter::KeywordFilter;
use crate::taxonomy::Taxonomy;
use crate::types::OrgField;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub filter: FilterConfig,
    pub logging: LoggingConfig,
    /// File the values were read from; `None` when running on defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: PathBuf,
    /// Replaces the built-in taxonomy when set
    pub taxonomy_path: Option<PathBuf>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATASET_PATH),
            taxonomy_path: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub fields: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            fields: get_default_filter_fields()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl Config {
    /// Load `config.toml` (or the file named by `SUPPORT_FINDER_CONFIG`), then apply env overrides.
    ///
    /// A missing default file means defaults; a missing file that was asked for is an error.
    pub fn load() -> Result<Self> {
        let (config_path, explicit) = match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => (PathBuf::from(path), true),
            _ => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        let mut config = if explicit || config_path.exists() {
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            FinderError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        let mut config = Self::from_toml_str(&content)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        // surface bad field names at load time rather than on first filter
        config.filter_fields()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = env::var(DATASET_PATH_ENV) {
            if !path.trim().is_empty() {
                self.dataset.path = PathBuf::from(path);
            }
        }
        self.logging.dir = self.logging_dir_with_env();
    }

    /// Log directory after the `SUPPORT_FINDER_LOG_DIR` override
    pub fn logging_dir_with_env(&self) -> PathBuf {
        match env::var(LOG_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => self.logging.dir.clone(),
        }
    }

    pub fn filter_fields(&self) -> Result<Vec<OrgField>> {
        if self.filter.fields.is_empty() {
            return Err(FinderError::Config(
                "filter.fields must name at least one field".to_string(),
            ));
        }
        self.filter.fields.iter().map(|f| f.parse()).collect()
    }

    pub fn keyword_filter(&self) -> Result<KeywordFilter> {
        Ok(KeywordFilter::new(self.filter_fields()?))
    }

    pub fn load_taxonomy(&self) -> Result<Taxonomy> {
        match &self.dataset.taxonomy_path {
            Some(path) => Taxonomy::load(path),
            None => Ok(Taxonomy::builtin().clone()),
        }
    }
}
