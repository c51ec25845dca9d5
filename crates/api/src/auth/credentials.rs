//! Admin credentials loaded from credentials.yaml.
//!
//! The admin password is set during initial setup and stored as an Argon2
//! hash in a `credentials.yaml` sibling of the mounted config file; it is
//! never read from the environment.

use std::path::Path;

use serde::Deserialize;

use super::password;

/// Stored admin credentials
#[derive(Debug, Clone, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("Admin credentials not configured")]
    NotConfigured,
    #[error("Failed to read credentials file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse credentials file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl AdminCredentials {
    /// Load credentials from the `credentials.yaml` next to the config file
    pub fn load(config_path: &Path) -> Result<Self, CredentialsError> {
        let path = config_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("credentials.yaml");

        if !path.exists() {
            return Err(CredentialsError::NotConfigured);
        }

        let raw = std::fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }

    /// Verify a login attempt against the stored hash
    pub fn verify(&self, username: &str, password: &str) -> bool {
        if username != self.username {
            return false;
        }
        password::verify_password(password, &self.password_hash).unwrap_or(false)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use std::fs;

    fn temp_config_dir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("graphiti-admin-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_and_verify() {
        let dir = temp_config_dir();
        let hash = hash_password("s3cure-admin-pw").unwrap();
        fs::write(
            dir.join("credentials.yaml"),
            format!("username: admin\npassword_hash: \"{hash}\"\n"),
        )
        .unwrap();

        let creds = AdminCredentials::load(&dir.join("config.yaml")).unwrap();
        assert!(creds.verify("admin", "s3cure-admin-pw"));
        assert!(!creds.verify("admin", "wrong"));
        assert!(!creds.verify("root", "s3cure-admin-pw"));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_missing_file_is_not_configured() {
        let dir = temp_config_dir();
        let result = AdminCredentials::load(&dir.join("config.yaml"));
        assert!(matches!(result, Err(CredentialsError::NotConfigured)));
        let _ = fs::remove_dir_all(dir);
    }
}
