use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use mapek_core::knowledge::{AdaptationRules, SpecialtyTable};

/// Newest rules file shape this build understands. Bump when the shape
/// changes and teach [`parse_rules`] to upgrade older files.
const CURRENT_RULES_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    S3,
    Memory,
}

/// Startup configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bucket: String,
    pub region: Option<String>,
    pub store: StoreKind,
    pub rules_path: Option<PathBuf>,
}

impl ServiceConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let store = match lookup("MAPEK_STORE").as_deref() {
            None | Some("s3") => StoreKind::S3,
            Some("memory") => StoreKind::Memory,
            Some(other) => {
                return Err(eyre::eyre!(
                    "MAPEK_STORE must be \"s3\" or \"memory\", got {other:?}"
                ));
            }
        };

        Ok(Self {
            bucket: lookup("MAPEK_BUCKET").unwrap_or_else(|| "mapek".to_string()),
            region: lookup("AWS_REGION"),
            store,
            rules_path: lookup("MAPEK_RULES_PATH").map(PathBuf::from),
        })
    }
}

/// Contents of the optional rules file: thresholds plus cold-start layouts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesFile {
    /// Schema version. Missing or 0 = pre-versioned file, same shape as v1.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub rules: AdaptationRules,
    #[serde(default)]
    pub specialties: SpecialtyTable,
}

pub fn load_rules(path: &Path) -> eyre::Result<RulesFile> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read rules at {}: {e}", path.display()))?;
    let rules_file = parse_rules(&contents)?;
    tracing::info!(
        path = %path.display(),
        specialties = rules_file.specialties.specialties.len(),
        "adaptation rules loaded"
    );
    Ok(rules_file)
}

/// Parse and validate a rules file.
pub fn parse_rules(contents: &str) -> eyre::Result<RulesFile> {
    // Check the version on raw JSON before committing to a shape.
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);

    if on_disk_version > u64::from(CURRENT_RULES_VERSION) {
        return Err(eyre::eyre!(
            "rules config_version {on_disk_version} is newer than this build supports \
             ({CURRENT_RULES_VERSION})"
        ));
    }

    let mut rules_file: RulesFile = serde_json::from_value(json)?;
    rules_file.config_version = CURRENT_RULES_VERSION;
    validate(&rules_file.rules)?;
    Ok(rules_file)
}

fn validate(rules: &AdaptationRules) -> eyre::Result<()> {
    for (name, rate) in [
        ("ignore_rate_low_density", rules.ignore_rate_low_density),
        ("accept_rate_high_density", rules.accept_rate_high_density),
    ] {
        if !(0.0..=1.0).contains(&rate) {
            return Err(eyre::eyre!("{name} must be between 0 and 1, got {rate}"));
        }
    }
    if rules.default_window_days == 0 {
        return Err(eyre::eyre!("default_window_days must be at least 1"));
    }
    Ok(())
}
