//! Settings construction
//!
//! Resolves each field of the record as: compiled-in default, then the env
//! file (if any), then the process environment. Keys match the names in
//! [`crate::settings::keys`] exactly, case-sensitively.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::env_file;
use crate::error::ConfigError;
use crate::settings::{keys, Settings};

/// Load settings using the process environment and the conventional `.env`
/// file in the current working directory.
pub fn load() -> Result<Settings, ConfigError> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    load_from(&cwd, None)
}

/// Load settings from `dir` (where the conventional `.env` is looked up)
/// and the process environment.
///
/// When `env_file` is given explicitly, a missing file is an error; the
/// auto-discovered `.env` may be absent without complaint.
pub fn load_from(dir: &Path, env_file: Option<&Path>) -> Result<Settings, ConfigError> {
    let env: HashMap<String, String> = std::env::vars().collect();
    load_with(dir, env_file, &env)
}

/// Like [`load_from`], but resolving against an explicit environment
/// snapshot instead of the process environment.
///
/// This is the seam consumers and tests use to construct arbitrary
/// configurations without mutating process-global state.
pub fn load_with(
    dir: &Path,
    env_file: Option<&Path>,
    env: &HashMap<String, String>,
) -> Result<Settings, ConfigError> {
    let file_path_provided = env_file.is_some();
    let path: PathBuf = match env_file {
        Some(p) => p.to_path_buf(),
        None => dir.join(env_file::ENV_FILE_NAME),
    };

    let file_vars: HashMap<String, String> = match env_file::read(&path) {
        Ok(pairs) => {
            tracing::debug!("loaded {} entries from {}", pairs.len(), path.display());
            pairs.into_iter().collect()
        }
        Err(e) if e.is_recoverable() && !file_path_provided => {
            tracing::debug!("no env file at {}, using defaults and environment", path.display());
            HashMap::new()
        }
        Err(e) => return Err(e),
    };

    resolve(&file_vars, env)
}

/// Apply precedence and coercion over a file layer and an environment layer.
fn resolve(
    file_vars: &HashMap<String, String>,
    env: &HashMap<String, String>,
) -> Result<Settings, ConfigError> {
    let pick = |key: &str| -> Option<&str> {
        env.get(key).map(String::as_str).or_else(|| file_vars.get(key).map(String::as_str))
    };

    let mut settings = Settings::default();

    if let Some(v) = pick(keys::SOLANA_NETWORK) {
        settings.solana_network = v.to_string();
    }
    if let Some(v) = pick(keys::SOLANA_RPC_URL) {
        settings.solana_rpc_url = v.to_string();
    }
    if let Some(v) = pick(keys::PROGRAM_ID) {
        settings.program_id = v.to_string();
    }
    if let Some(v) = pick(keys::IPFS_API_URL) {
        settings.ipfs_api_url = v.to_string();
    }
    if let Some(v) = pick(keys::PINATA_API_KEY) {
        settings.pinata_api_key = v.to_string();
    }
    if let Some(v) = pick(keys::PINATA_SECRET_KEY) {
        settings.pinata_secret_key = v.to_string();
    }
    if let Some(v) = pick(keys::PINATA_GATEWAY_URL) {
        settings.pinata_gateway_url = v.to_string();
    }
    if let Some(v) = pick(keys::DATABASE_URL) {
        settings.database_url = v.to_string();
    }
    if let Some(v) = pick(keys::REDIS_URL) {
        settings.redis_url = v.to_string();
    }
    if let Some(v) = pick(keys::API_PORT) {
        settings.api_port = parse_int(keys::API_PORT, v)?;
    }
    if let Some(v) = pick(keys::API_HOST) {
        settings.api_host = v.to_string();
    }
    if let Some(v) = pick(keys::CORS_ORIGINS) {
        settings.cors_origins = parse_origins(keys::CORS_ORIGINS, v)?;
    }
    if let Some(v) = pick(keys::LOCAL_LLM_URL) {
        settings.local_llm_url = v.to_string();
    }
    if let Some(v) = pick(keys::LLM_MODEL) {
        settings.llm_model = v.to_string();
    }
    if let Some(v) = pick(keys::INFERENCE_NODES) {
        settings.inference_nodes = parse_int(keys::INFERENCE_NODES, v)?;
    }
    if let Some(v) = pick(keys::LOG_LEVEL) {
        settings.log_level = v.to_string();
    }

    Ok(settings)
}

fn parse_int<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Coercion {
        key,
        value: raw.to_string(),
        expected: "integer",
    })
}

/// Parse the allowed-origins list.
///
/// Accepts the JSON string-array form (`["http://a.com","http://b.com"]`)
/// and, for values not opening with `[`, a comma-separated list.
fn parse_origins(key: &'static str, raw: &str) -> Result<Vec<String>, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        serde_json::from_str(trimmed).map_err(|_| ConfigError::Coercion {
            key,
            value: raw.to_string(),
            expected: "JSON string array",
        })
    } else {
        Ok(trimmed
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults_when_no_file_and_empty_env() {
        let tmp = TempDir::new().expect("tmp");
        let settings = load_with(tmp.path(), None, &HashMap::new()).expect("settings");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_file_overrides_default() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join(".env"), "SOLANA_NETWORK=testnet\nAPI_PORT=8100\n")
            .expect("write");

        let settings = load_with(tmp.path(), None, &HashMap::new()).expect("settings");
        assert_eq!(settings.solana_network, "testnet");
        assert_eq!(settings.api_port, 8100);
        // Untouched fields keep their defaults.
        assert_eq!(settings.llm_model, "llama3");
    }

    #[test]
    fn test_process_env_overrides_file_and_default() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join(".env"), "SOLANA_NETWORK=testnet\n").expect("write");

        let settings = load_with(tmp.path(), None, &env(&[("SOLANA_NETWORK", "mainnet-beta")]))
            .expect("settings");
        assert_eq!(settings.solana_network, "mainnet-beta");
    }

    #[test]
    fn test_port_coerces_to_integer() {
        let tmp = TempDir::new().expect("tmp");
        let settings =
            load_with(tmp.path(), None, &env(&[("API_PORT", "9090")])).expect("settings");
        assert_eq!(settings.api_port, 9090u16);
    }

    #[test]
    fn test_cors_origins_json_array_preserves_order() {
        let tmp = TempDir::new().expect("tmp");
        let settings = load_with(
            tmp.path(),
            None,
            &env(&[("CORS_ORIGINS", r#"["http://a.com","http://b.com"]"#)]),
        )
        .expect("settings");
        assert_eq!(settings.cors_origins, vec!["http://a.com", "http://b.com"]);
    }

    #[test]
    fn test_cors_origins_comma_separated_fallback() {
        let tmp = TempDir::new().expect("tmp");
        let settings = load_with(
            tmp.path(),
            None,
            &env(&[("CORS_ORIGINS", "http://a.com, http://b.com")]),
        )
        .expect("settings");
        assert_eq!(settings.cors_origins, vec!["http://a.com", "http://b.com"]);
    }

    #[test]
    fn test_bad_port_names_key_and_value() {
        let tmp = TempDir::new().expect("tmp");
        let err = load_with(tmp.path(), None, &env(&[("API_PORT", "not-a-number")]))
            .expect_err("should fail");
        let msg = err.to_string();
        assert!(msg.contains("API_PORT"), "error should name the key: {msg}");
        assert!(msg.contains("not-a-number"), "error should carry the raw value: {msg}");
    }

    #[test]
    fn test_bad_origins_json_is_coercion_error() {
        let tmp = TempDir::new().expect("tmp");
        let err = load_with(tmp.path(), None, &env(&[("CORS_ORIGINS", "[1, 2]")]))
            .expect_err("non-string array should fail");
        assert!(matches!(err, ConfigError::Coercion { key: "CORS_ORIGINS", .. }));
    }

    #[test]
    fn test_key_match_is_case_sensitive() {
        let tmp = TempDir::new().expect("tmp");
        let settings =
            load_with(tmp.path(), None, &env(&[("api_port", "9090")])).expect("settings");
        assert_eq!(settings.api_port, 8000);
    }

    #[test]
    fn test_inference_nodes_coerces() {
        let tmp = TempDir::new().expect("tmp");
        let settings =
            load_with(tmp.path(), None, &env(&[("INFERENCE_NODES", "12")])).expect("settings");
        assert_eq!(settings.inference_nodes, 12u32);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("custom.env");
        let err = load_with(tmp.path(), Some(&path), &HashMap::new())
            .expect_err("explicit path must exist");
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn test_explicit_file_path_is_used() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("custom.env");
        fs::write(&path, "LLM_MODEL=mistral\n").expect("write");

        let settings = load_with(tmp.path(), Some(&path), &HashMap::new()).expect("settings");
        assert_eq!(settings.llm_model, "mistral");
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join(".env"), "NOT A VALID LINE\n").expect("write");

        let err = load_with(tmp.path(), None, &HashMap::new()).expect_err("should fail");
        assert!(matches!(err, ConfigError::UnreadableFile { .. }));
    }

    #[test]
    fn test_deterministic_under_identical_inputs() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join(".env"), "API_PORT=8100\nPROGRAM_ID=abc\n").expect("write");
        let snapshot = env(&[("LLM_MODEL", "mistral")]);

        let a = load_with(tmp.path(), None, &snapshot).expect("first");
        let b = load_with(tmp.path(), None, &snapshot).expect("second");
        assert_eq!(a, b);
    }
}
