use anyhow::{anyhow, Result};
use serde::Deserialize;

/// Whole-application configuration, built once at startup and passed
/// into the server state. No ambient globals.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 5000 }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Mongo connection string (`mongodb://` or `mongodb+srv://`).
    #[serde(default)]
    pub uri: String,
    #[serde(default = "default_db_name")]
    pub name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { uri: String::new(), name: default_db_name() }
    }
}

fn default_db_name() -> String {
    "travelGeeks".to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthConfig {
    /// Shared secret used to sign and verify access tokens.
    #[serde(default)]
    pub access_token_secret: String,
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), fill gaps from the
    /// environment, and validate. A missing file is not an error as
    /// long as the environment supplies the required values.
    pub fn load_and_validate() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let mut cfg = match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content)?,
            // Missing file: run on environment variables alone.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
            Err(e) => return Err(e.into()),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.auth.normalize_from_env();
        self.auth.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize_from_env(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            self.port = port
                .parse()
                .map_err(|_| anyhow!("SERVER_PORT must be a port number, got {port:?}"))?;
        }
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(uri) = std::env::var("MONGODB_URI") {
            self.uri = uri;
        }
        if let Ok(name) = std::env::var("MONGODB_DB") {
            self.name = name;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.uri.trim().is_empty() {
            return Err(anyhow!(
                "database.uri is empty; set it in config.toml or the MONGODB_URI environment variable"
            ));
        }
        let lower = self.uri.to_lowercase();
        if !(lower.starts_with("mongodb://") || lower.starts_with("mongodb+srv://")) {
            return Err(anyhow!("database.uri must start with mongodb:// or mongodb+srv://"));
        }
        if self.name.trim().is_empty() {
            return Err(anyhow!("database.name must not be empty"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(secret) = std::env::var("ACCESS_TOKEN_SECRET") {
            self.access_token_secret = secret;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.access_token_secret.is_empty() {
            return Err(anyhow!(
                "auth.access_token_secret is empty; set it in config.toml or the ACCESS_TOKEN_SECRET environment variable"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_round_trip() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [database]
            uri = "mongodb://localhost:27017"

            [auth]
            access_token_secret = "s3cret"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.database.uri, "mongodb://localhost:27017");
        assert_eq!(cfg.database.name, "travelGeeks");
        assert_eq!(cfg.auth.access_token_secret, "s3cret");
    }

    #[test]
    fn rejects_non_mongo_uri() {
        let db = DatabaseConfig { uri: "postgres://nope".into(), name: "travelGeeks".into() };
        assert!(db.validate().is_err());
    }

    #[test]
    fn rejects_empty_secret() {
        let auth = AuthConfig { access_token_secret: String::new() };
        assert!(auth.validate().is_err());
    }
}
