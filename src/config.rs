use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".lokeyrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_call_name")]
    pub call_name: String,
    #[serde(default = "default_marker")]
    pub marker: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_format_placeholders")]
    pub format_placeholders: Vec<String>,
    #[serde(default = "default_strings_out")]
    pub strings_out: String,
    #[serde(default = "default_unify_new_values")]
    pub unify_new_values: bool,
}

fn default_call_name() -> String {
    "Text".to_string()
}

fn default_marker() -> String {
    "localized".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["swift".to_string()]
}

fn default_format_placeholders() -> Vec<String> {
    ["%@", "%d", "%f"].map(String::from).to_vec()
}

fn default_strings_out() -> String {
    "Localizable.strings".to_string()
}

fn default_unify_new_values() -> bool {
    false
}

impl Default for Config {
    fn default() -> Self {
        Self {
            call_name: default_call_name(),
            marker: default_marker(),
            extensions: default_extensions(),
            ignores: Vec::new(),
            format_placeholders: default_format_placeholders(),
            strings_out: default_strings_out(),
            unify_new_values: default_unify_new_values(),
        }
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.call_name) {
            bail!(
                "Invalid 'callName': \"{}\" is not an identifier",
                self.call_name
            );
        }
        if !is_identifier(&self.marker) {
            bail!("Invalid 'marker': \"{}\" is not an identifier", self.marker);
        }
        if self.extensions.iter().all(|e| e.trim_start_matches('.').is_empty()) {
            bail!("'extensions' must name at least one file suffix");
        }
        if self.strings_out.trim().is_empty() {
            bail!("'stringsOut' must not be empty");
        }

        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'ignores': \"{}\"", pattern)
                })?;
            }
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
