use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use super::error::Error;
use super::types::{RegionId, SourceKind};
use common::types::LocationId;
use patrol_core::builder::DEFAULT_SECURITY_THRESHOLD;

fn default_security_threshold() -> f64 {
    DEFAULT_SECURITY_THRESHOLD
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisConfig {
    pub region_ids: Vec<RegionId>,
    #[serde(default = "default_security_threshold")]
    pub security_threshold: f64,
    pub origin: LocationId,
    #[serde(default)]
    pub canonical_dedup: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub systems_path: Option<PathBuf>,
    pub activity_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulatorConfig {
    pub first_location_id: LocationId,
    pub locations_per_region: usize,
    pub extra_links: usize,
    pub max_kills: u32,
    pub max_jumps: u32,
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub dot_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub source: SourceConfig,
    pub simulator: SimulatorConfig,
    pub output: OutputConfig,
}

/// Loads configuration from a file and environment variables.
///
/// Without an explicit `path` the file is looked up at
/// `crates/executor/Config.toml` under the current directory. Variables
/// prefixed `PATROL__` override file values, e.g.
/// `PATROL__ANALYSIS__ORIGIN=30003792` or
/// `PATROL__ANALYSIS__REGION_IDS=10000048,10000051`.
pub fn load_config(path: Option<&Path>) -> Result<Config, Error> {
    load_config_with_env(path, env_overlay())
}

/// Environment source for `PATROL__`-prefixed overrides. List-valued keys
/// are split on commas.
fn env_overlay() -> Environment {
    Environment::with_prefix("PATROL")
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("analysis.region_ids")
        .try_parsing(true)
}

fn load_config_with_env(path: Option<&Path>, environment: Environment) -> Result<Config, Error> {
    let config_file_path: PathBuf = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let base_path = env::current_dir().map_err(|e| {
                Error::ConfigLoadError(format!("Failed to determine current directory: {}", e))
            })?;
            base_path
                .join("crates")
                .join("executor")
                .join("Config.toml")
        }
    };

    if !config_file_path.exists() {
        return Err(Error::ConfigLoadError(format!(
            "Configuration file not found at calculated path: {}",
            config_file_path.display()
        )));
    }

    let s = ConfigLoader::builder()
        .add_source(File::from(config_file_path.as_path()).required(true))
        .add_source(environment)
        .build()
        .map_err(|e| Error::ConfigLoadError(e.to_string()))?;

    let app_config: Config = s
        .try_deserialize()
        .map_err(|e| Error::ConfigLoadError(format!("Failed to deserialize config: {}", e)))?;

    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MOCK_CONFIG: &str = r#"
[analysis]
region_ids = [10000048]
origin = 30003792

[source]
kind = "csv"
systems_path = "data/systems.csv"

[simulator]
first_location_id = 30003790
locations_per_region = 40
extra_links = 12
max_kills = 30
max_jumps = 400

[output]
dot_path = "graph.dot"
"#;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write mock config");
        file
    }

    #[test]
    fn test_load_config_applies_defaults() {
        let file = write_config(MOCK_CONFIG);

        let config = load_config(Some(file.path())).expect("config should load");

        assert_eq!(config.analysis.region_ids, vec![10000048]);
        assert_eq!(config.analysis.origin, 30003792);
        assert_eq!(config.analysis.security_threshold, DEFAULT_SECURITY_THRESHOLD);
        assert!(!config.analysis.canonical_dedup);
        assert_eq!(config.source.kind, SourceKind::Csv);
        assert!(config.source.activity_path.is_none());
        assert!(config.simulator.seed.is_none());
        assert_eq!(config.output.dot_path, PathBuf::from("graph.dot"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config(Some(Path::new("does/not/exist.toml")));

        match result {
            Err(Error::ConfigLoadError(msg)) => assert!(msg.contains("not found")),
            other => panic!("Expected ConfigLoadError, got: {:?}", other),
        }
    }

    #[test]
    fn test_load_config_rejects_unknown_source_kind() {
        let file = write_config(&MOCK_CONFIG.replace("\"csv\"", "\"http\""));

        assert!(matches!(
            load_config(Some(file.path())),
            Err(Error::ConfigLoadError(_))
        ));
    }

    #[test]
    fn test_env_overrides_region_list_and_origin() {
        let file = write_config(MOCK_CONFIG);
        let vars = config::Map::from([
            (
                "PATROL__ANALYSIS__REGION_IDS".to_string(),
                "10000048,10000051".to_string(),
            ),
            ("PATROL__ANALYSIS__ORIGIN".to_string(), "30003793".to_string()),
        ]);

        let config = load_config_with_env(Some(file.path()), env_overlay().source(Some(vars)))
            .expect("config should load");

        assert_eq!(config.analysis.region_ids, vec![10000048, 10000051]);
        assert_eq!(config.analysis.origin, 30003793);
    }
}
