use std::env;
use std::path::PathBuf;

fn env_string(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(default)
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// Development mode adds the live server address to the generated
    /// documents.
    pub development: bool,
    pub descriptions_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            data_dir: PathBuf::from("data"),
            development: false,
            // Ships with the crate; override with TODO_DESCRIPTIONS_PATH when
            // deploying the binary elsewhere.
            descriptions_path: PathBuf::from(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/assets/api-descriptions.json"
            )),
        }
    }
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_string("TODO_HOST", &defaults.host),
            port: env_u16("TODO_PORT", defaults.port),
            data_dir: PathBuf::from(env_string(
                "TODO_DATA_DIR",
                &defaults.data_dir.display().to_string(),
            )),
            development: env_bool("TODO_DEVELOPMENT", defaults.development),
            descriptions_path: PathBuf::from(env_string(
                "TODO_DESCRIPTIONS_PATH",
                &defaults.descriptions_path.display().to_string(),
            )),
        }
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
