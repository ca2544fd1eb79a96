use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Complete configuration for git-versioning.
///
/// Contains the ordered branch and tag rule lists, the catch-all commit
/// rule, static property overrides and behavior options. Rule order is
/// priority order - the first matching rule wins.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub branch: Vec<RuleConfig>,

    #[serde(default)]
    pub tag: Vec<RuleConfig>,

    #[serde(default)]
    pub commit: CommitConfig,

    #[serde(default)]
    pub properties: HashMap<String, String>,

    /// Export the full context map as properties alongside the version
    #[serde(default)]
    pub include_properties: bool,

    #[serde(default)]
    pub overrides: OverridesConfig,
}

/// One version format rule: a regex selecting refs, a literal prefix
/// stripped from the ref name, and the format template to render.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RuleConfig {
    pub pattern: String,

    #[serde(default)]
    pub prefix: String,

    pub format: String,
}

/// The catch-all rule applied when no branch or tag rule matches
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommitConfig {
    #[serde(default = "default_commit_format")]
    pub format: String,
}

fn default_commit_format() -> String {
    "${commit}".to_string()
}

impl Default for CommitConfig {
    fn default() -> Self {
        CommitConfig {
            format: default_commit_format(),
        }
    }
}

/// Externally provided literal values replacing the corresponding
/// repository fact before any rule matching. An empty provided branch
/// or tag means "treat as absent", not "empty name".
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct OverridesConfig {
    pub commit: Option<String>,
    pub branch: Option<String>,
    pub tag: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            branch: vec![RuleConfig {
                pattern: ".*".to_string(),
                prefix: String::new(),
                format: "${branch}-SNAPSHOT".to_string(),
            }],
            tag: vec![RuleConfig {
                pattern: "v[0-9].*".to_string(),
                prefix: "v".to_string(),
                format: "${tag}".to_string(),
            }],
            commit: CommitConfig::default(),
            properties: HashMap::new(),
            include_properties: false,
            overrides: OverridesConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitversioning.toml` in current directory
/// 3. `.gitversioning.toml` in user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gitversioning.toml").exists() {
        fs::read_to_string("./gitversioning.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".gitversioning.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
