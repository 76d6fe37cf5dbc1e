use super::defaults::MAX_ENV_FILE_BYTES;
use super::error::ConfigError;
use super::types::WorkerEnv;
use std::path::Path;
use tracing::{debug, warn};

/// On-disk format of a worker environment file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvFileFormat {
    Dotenv,
    Json5,
    Yaml,
    Toml,
}

impl EnvFileFormat {
    /// Pick the format from the file extension; anything unrecognised is dotenv.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") | Some("json5") => Self::Json5,
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => Self::Dotenv,
        }
    }
}

/// Parse worker environment content in the given format.
///
/// `path` is only used for error messages.
pub fn parse_worker_env(
    content: &str,
    format: EnvFileFormat,
    path: &Path,
) -> Result<WorkerEnv, ConfigError> {
    match format {
        EnvFileFormat::Json5 => json5::from_str(content).map_err(|e| ConfigError::parse(path, e)),
        EnvFileFormat::Yaml => {
            // An empty YAML document is an empty environment, not an error.
            if content.trim().is_empty() {
                return Ok(WorkerEnv::default());
            }
            serde_yaml::from_str(content).map_err(|e| ConfigError::parse(path, e))
        }
        EnvFileFormat::Toml => toml::from_str(content).map_err(|e| ConfigError::parse(path, e)),
        EnvFileFormat::Dotenv => {
            let mut env = WorkerEnv::default();
            for item in dotenvy::from_read_iter(content.as_bytes()) {
                let (name, value) = item.map_err(|source| ConfigError::Dotenv {
                    path: path.to_path_buf(),
                    source,
                })?;
                if !env.set(&name, value) {
                    debug!(name = %name, "ignoring unrecognised variable");
                }
            }
            Ok(env)
        }
    }
}

/// Read a worker environment file with size and symlink guardrails.
pub fn read_worker_env_file(path: &Path) -> Result<WorkerEnv, ConfigError> {
    let io_err = |source: std::io::Error| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    #[cfg(unix)]
    if std::fs::symlink_metadata(path)
        .map_err(io_err)?
        .file_type()
        .is_symlink()
    {
        return Err(ConfigError::Symlink {
            path: path.to_path_buf(),
        });
    }

    let size = std::fs::metadata(path).map_err(io_err)?.len();
    if size > MAX_ENV_FILE_BYTES {
        return Err(ConfigError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit: MAX_ENV_FILE_BYTES,
        });
    }

    let content = std::fs::read_to_string(path).map_err(io_err)?;
    let format = EnvFileFormat::from_path(path);
    let env = parse_worker_env(&content, format, path)?;

    let unset: Vec<&str> = env
        .present_vars()
        .filter(|name| env.get(name).is_some_and(str::is_empty))
        .collect();
    if !unset.is_empty() {
        warn!(file = %path.display(), vars = ?unset, "variables declared with empty values");
    }

    Ok(env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(EnvFileFormat::from_path(Path::new("a.json")), EnvFileFormat::Json5);
        assert_eq!(EnvFileFormat::from_path(Path::new("a.json5")), EnvFileFormat::Json5);
        assert_eq!(EnvFileFormat::from_path(Path::new("a.yml")), EnvFileFormat::Yaml);
        assert_eq!(EnvFileFormat::from_path(Path::new("a.toml")), EnvFileFormat::Toml);
        assert_eq!(EnvFileFormat::from_path(Path::new(".env")), EnvFileFormat::Dotenv);
        assert_eq!(EnvFileFormat::from_path(Path::new("prod.env")), EnvFileFormat::Dotenv);
    }

    #[test]
    fn reads_dotenv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            ".env",
            "# worker bindings\nAI_GATEWAY_API_KEY=gk\nDEV_MODE=true\nUNRELATED=1\n",
        );
        let env = read_worker_env_file(&path).unwrap();
        assert_eq!(env.ai_gateway_api_key.as_deref(), Some("gk"));
        assert_eq!(env.dev_mode.as_deref(), Some("true"));
    }

    #[test]
    fn reads_json5_with_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "moltbot-env.json",
            "{\n  // gateway\n  AI_GATEWAY_BASE_URL: 'https://x/compat',\n  DEV_MODE: true,\n}\n",
        );
        let env = read_worker_env_file(&path).unwrap();
        assert_eq!(env.ai_gateway_base_url.as_deref(), Some("https://x/compat"));
        assert_eq!(env.dev_mode.as_deref(), Some("true"));
    }

    #[test]
    fn reads_yaml_and_toml() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = write_file(&dir, "env.yaml", "TELEGRAM_DM_POLICY: pairing\nDEV_MODE: false\n");
        let toml = write_file(&dir, "env.toml", "WORKER_URL = \"https://w\"\n");
        assert_eq!(
            read_worker_env_file(&yaml).unwrap().telegram_dm_policy.as_deref(),
            Some("pairing")
        );
        assert_eq!(
            read_worker_env_file(&toml).unwrap().worker_url.as_deref(),
            Some("https://w")
        );
    }

    #[test]
    fn empty_yaml_is_empty_env() {
        let env = parse_worker_env("", EnvFileFormat::Yaml, Path::new("x.yaml")).unwrap();
        assert_eq!(env, WorkerEnv::default());
    }

    #[test]
    fn parse_error_names_the_file() {
        let err = parse_worker_env("{ not json", EnvFileFormat::Json5, Path::new("bad.json"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_worker_env_file(Path::new("/definitely/not/here/.env")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn oversized_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let big = "#".repeat(MAX_ENV_FILE_BYTES as usize + 1);
        let path = write_file(&dir, ".env", &big);
        let err = read_worker_env_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let target = write_file(&dir, "real.env", "WORKER_URL=https://w\n");
        let link = dir.path().join("link.env");
        std::os::unix::fs::symlink(&target, &link).unwrap();
        let err = read_worker_env_file(&link).unwrap_err();
        assert!(matches!(err, ConfigError::Symlink { .. }));
    }
}
