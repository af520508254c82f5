use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

mod defaults;

/// Root configuration structure, deserialized from `.secop-taxonomy/config.toml`.
///
/// Every section falls back to the built-in tables when omitted, so a file
/// only needs to carry what it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Record selection applied before classification.
    pub filter: FilterConfig,
    /// Text cleaning vocabulary.
    pub text: TextConfig,
    /// Contractual-object dictionary, in priority order.
    pub objects: Vec<CategoryRule>,
    /// Thematic sub-category dictionary, in priority order.
    pub subcategories: Vec<CategoryRule>,
    /// Partition of sub-categories into macro-categories.
    pub macros: Vec<MacroGroup>,
    /// Open-data API settings used by `--fetch`.
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Contract statuses kept (compared after text normalization).
    pub statuses: Vec<String>,
    /// Sectors dropped (compared after text normalization).
    pub excluded_sectors: Vec<String>,
    /// Drop records whose category code has no known family.
    pub require_unspsc_family: bool,
    /// UNSPSC family codes (`72xx`) and their names.
    pub unspsc_families: Vec<UnspscFamily>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnspscFamily {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Single-token leading words removed before classification.
    pub stopwords: Vec<String>,
    /// Ordered misspelling corrections.
    pub typos: Vec<TypoRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypoRule {
    pub from: String,
    pub to: String,
}

/// One category of a keyword dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub label: String,
    /// Words or phrases, in normalized form.
    pub keywords: Vec<String>,
}

/// One macro-category and the sub-categories it groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroGroup {
    pub label: String,
    pub subcategories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Socrata resource endpoint.
    pub base_url: String,
    /// Rows requested per page (`$limit`).
    pub chunk_size: usize,
    /// Attempts per page before giving up.
    pub max_retries: u32,
    /// Pause between pages, also the initial retry backoff.
    pub page_delay_ms: u64,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Years downloaded concurrently.
    pub concurrent_years: usize,
    /// `orden` filter (`Nacional` / `Territorial`).
    pub orden: String,
    /// `tipo_de_contrato` filter.
    pub tipo_de_contrato: String,
    /// Columns requested through `$select`.
    pub columns: Vec<String>,
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.secop-taxonomy/config.toml`
/// 3. `~/.config/secop-taxonomy/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".secop-taxonomy").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("secop-taxonomy")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    tracing::debug!("no config file found, using built-in tables");
    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("parsing config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FALLBACK_CATEGORY;

    #[test]
    fn test_default_tables_shape() {
        let cfg = Config::default();
        assert_eq!(cfg.objects.len(), 6);
        assert_eq!(cfg.subcategories.len(), 19);
        assert_eq!(cfg.macros.len(), 5);
        assert_eq!(cfg.objects[0].label, "Adecuacion");
        assert!(cfg
            .macros
            .iter()
            .any(|g| g.label == FALLBACK_CATEGORY
                && g.subcategories.iter().any(|s| s == "Publico")));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let toml = r#"
[text]
stopwords = ["el", "la"]

[[objects]]
label = "Dragado"
keywords = ["dragado"]
"#;
        let cfg: Config = toml::from_str(toml).unwrap();
        assert_eq!(cfg.text.stopwords, vec!["el", "la"]);
        assert_eq!(cfg.text.typos, Config::default().text.typos);
        assert_eq!(cfg.objects.len(), 1);
        assert_eq!(cfg.subcategories, Config::default().subcategories);
        assert_eq!(cfg.source.chunk_size, 5000);
    }

    #[test]
    fn test_order_preserved_through_toml() {
        let rendered = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        let labels: Vec<_> = parsed.subcategories.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels.first(), Some(&"Publico"));
        assert_eq!(labels.last(), Some(&"Deporte"));
        assert_eq!(parsed.subcategories, Config::default().subcategories);
    }

    #[test]
    fn test_load_config_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[filter]\nrequire_unspsc_family = true\n").unwrap();

        let cfg = load_config(dir.path(), Some(&path)).unwrap();
        assert!(cfg.filter.require_unspsc_family);
        assert_eq!(cfg.filter.statuses, Config::default().filter.statuses);
    }

    #[test]
    fn test_load_config_project_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_dir = dir.path().join(".secop-taxonomy");
        std::fs::create_dir_all(&cfg_dir).unwrap();
        std::fs::write(
            cfg_dir.join("config.toml"),
            "[source]\nchunk_size = 100\n",
        )
        .unwrap();

        let cfg = load_config(dir.path(), None).unwrap();
        assert_eq!(cfg.source.chunk_size, 100);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[[objects]]\nlabel = 3\n").unwrap();
        assert!(load_config(dir.path(), Some(&path)).is_err());
    }
}
