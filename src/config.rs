use std::env;

use actix_web::cookie::Key;

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub mongodb_db: String,
    /// Raw session key material; `None` means a key is generated per process.
    pub session_secret: Option<String>,
    /// Only send the session cookie over HTTPS.
    pub secure_cookies: bool,
    pub site_name: String,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|cost| (4..=31).contains(cost))
                .ok_or("BCRYPT_COST must be a number between 4 and 31")?,
            None => bcrypt::DEFAULT_COST,
        };

        let session_secret = lookup("SESSION_SECRET").filter(|s| !s.is_empty());
        if let Some(secret) = &session_secret {
            if secret.len() < 64 {
                return Err("SESSION_SECRET must be at least 64 bytes long".to_string());
            }
        }

        Ok(Self {
            host: lookup("IP").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .map_err(|_| "PORT must be a valid number")?,
            mongodb_uri: lookup("MONGODB_URI")
                .unwrap_or_else(|| "mongodb://localhost:27017".to_string()),
            mongodb_db: lookup("MONGODB_DB").unwrap_or_else(|| "blog_app".to_string()),
            session_secret,
            secure_cookies: lookup("SESSION_SECURE")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            site_name: lookup("SITE_NAME").unwrap_or_else(|| "Disrupter".to_string()),
            bcrypt_cost,
        })
    }

    /// Session cookie key. Without a configured secret every restart logs
    /// everyone out.
    pub fn session_key(&self) -> Key {
        match &self.session_secret {
            Some(secret) => Key::from(secret.as_bytes()),
            None => {
                log::warn!("SESSION_SECRET not set, generating a throwaway session key");
                Key::generate()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.mongodb_uri, "mongodb://localhost:27017");
        assert_eq!(config.mongodb_db, "blog_app");
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert!(config.session_secret.is_none());
        assert!(!config.secure_cookies);
    }

    #[test]
    fn reads_bind_address_from_environment() {
        let config = load(&[("IP", "0.0.0.0"), ("PORT", "8080")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);

        let config = load(&[("SESSION_SECURE", "true")]).unwrap();
        assert!(config.secure_cookies);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(load(&[("PORT", "http")]).is_err());
        assert!(load(&[("BCRYPT_COST", "2")]).is_err());
        assert!(load(&[("SESSION_SECRET", "too short")]).is_err());
    }

    #[test]
    fn long_secret_builds_a_key() {
        let secret = "s".repeat(64);
        let config = load(&[("SESSION_SECRET", secret.as_str())]).unwrap();
        let _ = config.session_key();
    }
}
