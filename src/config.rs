use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Present only when `DATABASE_URL` is set
    pub database: Option<DatabaseConfig>,
    pub env_presence: EnvPresence,
}

/// Which database variables are set. Values are deliberately not kept here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvPresence {
    pub database_url: bool,
    pub database_name: bool,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub name: Option<String>,
    pub ssl_mode: String,
    pub max_connections: usize,
    pub connection_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };

        if port == 0 {
            anyhow::bail!("PORT must be greater than 0");
        }

        let database_url = var("DATABASE_URL");
        let database_name = var("DATABASE_NAME");

        // Presence only needs a non-empty value; whitespace still counts as set
        let present = |key: &str| lookup(key).is_some_and(|value| !value.is_empty());
        let env_presence = EnvPresence {
            database_url: present("DATABASE_URL"),
            database_name: present("DATABASE_NAME"),
        };

        let database =
            database_url.map(|url| DatabaseConfig::from_parts(url, database_name, &var));

        Ok(Config {
            port,
            database,
            env_presence,
        })
    }
}

impl DatabaseConfig {
    /// Pool tuning falls back to defaults when a value does not parse;
    /// the database is optional and must not keep the server from starting.
    fn from_parts<F>(url: String, name: Option<String>, var: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let ssl_mode = var("DATABASE_SSL_MODE").unwrap_or_else(|| "prefer".to_string());

        let max_connections = var("DATABASE_MAX_CONNECTIONS")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(4);

        let connection_timeout_secs = var("DATABASE_CONNECTION_TIMEOUT")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(5);

        DatabaseConfig {
            url,
            name,
            ssl_mode,
            max_connections,
            connection_timeout: Duration::from_secs(connection_timeout_secs),
        }
    }

    /// Checks the settings a pool needs. Failing here leaves the database
    /// uninitialized rather than stopping the server.
    pub fn validate(&self) -> Result<()> {
        if !self.url.starts_with("postgresql://") && !self.url.starts_with("postgres://") {
            anyhow::bail!("DATABASE_URL must start with 'postgresql://' or 'postgres://'");
        }

        if let Some(ref name) = self.name {
            if name.contains(char::is_whitespace) {
                anyhow::bail!("DATABASE_NAME cannot contain whitespace");
            }
        }

        match self.ssl_mode.as_str() {
            "disable" | "prefer" | "require" => {}
            _ => anyhow::bail!("Invalid SSL mode. Must be one of: disable, prefer, require"),
        }

        if self.max_connections == 0 {
            anyhow::bail!("Max connections must be greater than 0");
        }

        if self.connection_timeout.as_secs() == 0 {
            anyhow::bail!("Connection timeout must be greater than 0");
        }

        Ok(())
    }
}

// The URL carries credentials, keep it out of logs
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("name", &self.name)
            .field("ssl_mode", &self.ssl_mode)
            .field("max_connections", &self.max_connections)
            .field("connection_timeout", &self.connection_timeout)
            .finish()
    }
}
