use std::path::PathBuf;

const DEFAULT_DATA_FILE: &str = "data.json";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

/// Server settings, read from `COCKTAILDB_*` environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source. Missing values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_file = lookup("COCKTAILDB_DATA_FILE")
            .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string())
            .into();
        let host = lookup("COCKTAILDB_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("COCKTAILDB_PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid COCKTAILDB_PORT '{raw}', using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Config {
            data_file,
            host,
            port,
        }
    }
}
