use anyhow::{Context, Result};
use std::env;

/// Connection parameters for the message store plus the listen address.
/// All `DB_*` variables are required; serving without a reachable store is
/// meaningless, so a missing one fails startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen: String,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let listen = env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let db_port: u16 = require("DB_PORT")?
            .parse()
            .context("DB_PORT is not a valid port number")?;
        Ok(Self {
            listen,
            db_host: require("DB_HOST")?,
            db_port,
            db_user: require("DB_USER")?,
            db_password: require("DB_PASSWORD")?,
            db_name: require("DB_NAME")?,
        })
    }
}

fn require(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{name} not set"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_reads_all_variables() {
        std::env::set_var("DB_HOST", "localhost");
        std::env::set_var("DB_PORT", "5432");
        std::env::set_var("DB_USER", "postgres");
        std::env::set_var("DB_PASSWORD", "secret");
        std::env::set_var("DB_NAME", "msgboard");

        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.db_host, "localhost");
        assert_eq!(cfg.db_port, 5432);
        assert_eq!(cfg.db_name, "msgboard");
        assert_eq!(cfg.listen, "0.0.0.0:8080");
    }
}
