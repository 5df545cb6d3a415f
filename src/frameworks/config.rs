use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fmt, fs, time::Duration};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_CONFIG_FILE: &str = "genai.toml";
const FALLBACK_SESSION_FILE: &str = ".genai_session.json";

// Optional `genai.toml` contents. Environment variables win over these.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_base_url: Option<String>,
    pub request_timeout_ms: Option<u64>,
    pub session_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    // None disables the per-request deadline.
    pub request_timeout: Option<Duration>,
    pub session_file: PathBuf,
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, err: std::io::Error },
    Parse { path: PathBuf, err: toml::de::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, err } => {
                write!(f, "failed to read config {}: {err}", path.display())
            }
            ConfigError::Parse { path, err } => {
                write!(f, "failed to parse config {}: {err}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let file = match env::var("GENAI_CONFIG") {
            Ok(path) => read_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                read_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            Err(_) => FileConfig::default(),
        };
        Ok(Self::resolve(file, |key| env::var(key).ok()))
    }

    // Merge file values with environment lookups, falling back to defaults.
    pub fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let api_base_url = env("API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .or(file.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let timeout_ms = env("API_TIMEOUT_MS")
            .and_then(|value| value.parse::<u64>().ok())
            .or(file.request_timeout_ms)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);
        let request_timeout = (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms));

        let session_file = env("GENAI_SESSION_FILE")
            .map(PathBuf::from)
            .or(file.session_file)
            .unwrap_or_else(default_session_file);

        Self {
            api_base_url,
            request_timeout,
            session_file,
        }
    }
}

pub fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|err| ConfigError::Read {
        path: path.to_path_buf(),
        err,
    })?;
    toml::from_str(&raw).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        err,
    })
}

fn default_session_file() -> PathBuf {
    directories::ProjectDirs::from("", "", "genai")
        .map(|dirs| dirs.data_dir().join("session.json"))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_SESSION_FILE))
}
