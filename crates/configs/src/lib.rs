use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub identity: IdentityConfig,
}

/// Paths of the two JSON documents the catalog persists to.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    #[serde(default = "default_user_db_path")]
    pub user_db_path: String,
    #[serde(default = "default_claims_db_path")]
    pub claims_db_path: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self { user_db_path: default_user_db_path(), claims_db_path: default_claims_db_path() }
    }
}

fn default_user_db_path() -> String {
    "data/identity/users.json".to_string()
}

fn default_claims_db_path() -> String {
    "data/identity/claims.json".to_string()
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.identity.normalize_from_env();
        self.identity.validate()?;
        Ok(())
    }
}

impl IdentityConfig {
    /// Fill empty paths from the environment before falling back to defaults.
    pub fn normalize_from_env(&mut self) {
        if self.user_db_path.trim().is_empty() {
            self.user_db_path =
                std::env::var("IDENTITY_USER_DB").unwrap_or_else(|_| default_user_db_path());
        }
        if self.claims_db_path.trim().is_empty() {
            self.claims_db_path =
                std::env::var("IDENTITY_CLAIMS_DB").unwrap_or_else(|_| default_claims_db_path());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.user_db_path.trim().is_empty() {
            return Err(anyhow!("identity.user_db_path must not be empty"));
        }
        if self.claims_db_path.trim().is_empty() {
            return Err(anyhow!("identity.claims_db_path must not be empty"));
        }
        if self.user_db_path == self.claims_db_path {
            return Err(anyhow!("identity.user_db_path and identity.claims_db_path must differ"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_section_absent() {
        let cfg: AppConfig = toml::from_str("").expect("parse empty config");
        assert_eq!(cfg.identity.user_db_path, "data/identity/users.json");
        assert_eq!(cfg.identity.claims_db_path, "data/identity/claims.json");
        assert!(cfg.identity.validate().is_ok());
    }

    #[test]
    fn toml_paths_are_honored() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [identity]
            user_db_path = "/var/lib/idp/users.json"
            claims_db_path = "/var/lib/idp/claims.json"
            "#,
        )
        .expect("parse config");
        assert_eq!(cfg.identity.user_db_path, "/var/lib/idp/users.json");
        assert_eq!(cfg.identity.claims_db_path, "/var/lib/idp/claims.json");
    }

    #[test]
    fn env_fills_empty_paths() {
        let mut cfg: AppConfig = toml::from_str(
            r#"
            [identity]
            user_db_path = ""
            claims_db_path = ""
            "#,
        )
        .expect("parse config");

        std::env::set_var("IDENTITY_USER_DB", "/var/lib/idp/env-users.json");
        std::env::set_var("IDENTITY_CLAIMS_DB", "/var/lib/idp/env-claims.json");
        cfg.identity.normalize_from_env();
        std::env::remove_var("IDENTITY_USER_DB");
        std::env::remove_var("IDENTITY_CLAIMS_DB");

        assert_eq!(cfg.identity.user_db_path, "/var/lib/idp/env-users.json");
        assert_eq!(cfg.identity.claims_db_path, "/var/lib/idp/env-claims.json");
        assert!(cfg.identity.validate().is_ok());
    }

    #[test]
    fn identical_paths_are_rejected() {
        let mut cfg: AppConfig = toml::from_str(
            r#"
            [identity]
            user_db_path = "same.json"
            claims_db_path = "same.json"
            "#,
        )
        .expect("parse config");
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn load_from_file_round_trips() -> Result<()> {
        let path = std::env::temp_dir().join(format!("idp_cfg_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "[identity]\nuser_db_path = \"u.json\"\nclaims_db_path = \"c.json\"\n",
        )?;
        let cfg = load_from_file(path.to_str().ok_or_else(|| anyhow!("utf8 path"))?)?;
        assert_eq!(cfg.identity.user_db_path, "u.json");
        let _ = std::fs::remove_file(&path);
        Ok(())
    }
}
