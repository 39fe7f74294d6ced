use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_USER: &str = "root";
pub const DEFAULT_DB_PORT: u16 = 3306;
pub const DEFAULT_DB_NAME: &str = "foodsdb";
pub const DEFAULT_POOL_SIZE: u32 = 10;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a valid number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Database and listener settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_host: String,
    pub db_user: String,
    pub db_password: String,
    pub db_port: u16,
    pub db_name: String,
    pub pool_size: u32,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Reads the process environment. Call `dotenv::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |var: &str, default: &str| lookup(var).unwrap_or_else(|| default.to_string());

        Ok(Self {
            db_host: text("DB_HOST", DEFAULT_DB_HOST),
            db_user: text("DB_USER", DEFAULT_DB_USER),
            db_password: text("DB_PASSWORD", ""),
            db_port: number(&lookup, "DB_PORT", DEFAULT_DB_PORT)?,
            db_name: text("DB_NAME", DEFAULT_DB_NAME),
            pool_size: number(&lookup, "DB_POOL_SIZE", DEFAULT_POOL_SIZE)?,
            host: text("HOST", DEFAULT_HOST),
            port: number(&lookup, "PORT", DEFAULT_PORT)?,
        })
    }

    /// Connection URL for diesel's `MysqlConnection`.
    pub fn database_url(&self) -> String {
        let credentials = if self.db_password.is_empty() {
            urlencoding::encode(&self.db_user).into_owned()
        } else {
            format!(
                "{}:{}",
                urlencoding::encode(&self.db_user),
                urlencoding::encode(&self.db_password)
            )
        };
        format!(
            "mysql://{}@{}:{}/{}",
            credentials, self.db_host, self.db_port, self.db_name
        )
    }
}

fn number<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.db_host, DEFAULT_DB_HOST);
        assert_eq!(config.db_port, DEFAULT_DB_PORT);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.database_url(), "mysql://root@localhost:3306/foodsdb");
    }

    #[test]
    fn credentials_are_percent_encoded() {
        let config = config(&[
            ("DB_USER", "fit"),
            ("DB_PASSWORD", "p@ss/word"),
            ("DB_HOST", "db"),
            ("DB_PORT", "3307"),
            ("DB_NAME", "foods"),
        ])
        .unwrap();
        assert_eq!(config.database_url(), "mysql://fit:p%40ss%2Fword@db:3307/foods");
    }

    #[test]
    fn invalid_port_is_an_error() {
        assert_eq!(
            config(&[("PORT", "http")]),
            Err(ConfigError::InvalidNumber {
                var: "PORT",
                value: "http".to_string()
            })
        );
    }
}
