//! Configuration module
//!
//! Ghostwriter connection settings and the values stamped onto every
//! extracted entry. Loaded once at startup from environment variables.

use std::fmt;

use oplog_core::EntrySource;

/// Sync configuration
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Ghostwriter base URL (e.g., "https://ghostwriter.local")
    pub ghostwriter_url: String,

    /// Oplog the entries are inserted into
    pub oplog_id: i64,

    /// Ghostwriter API token
    pub api_token: String,

    /// Host the payload was executing on, recorded as `sourceIp`
    pub source_host: String,

    /// Operator who ran the commands
    pub operator_name: String,

    /// Accept invalid TLS certificates from Ghostwriter
    pub insecure_skip_verify: bool,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - GHOSTWRITER_URL (required)
    /// - GHOSTWRITER_OPLOG_ID (required)
    /// - GHOSTWRITER_API_KEY (required)
    /// - OPLOG_SOURCE_HOST (optional, default: empty)
    /// - OPLOG_OPERATOR (optional, default: empty)
    /// - GHOSTWRITER_INSECURE_SKIP_VERIFY (optional, default: false)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ghostwriter_url = lookup("GHOSTWRITER_URL")
            .ok_or_else(|| anyhow::anyhow!("GHOSTWRITER_URL environment variable not set"))?;

        let oplog_id = lookup("GHOSTWRITER_OPLOG_ID")
            .ok_or_else(|| anyhow::anyhow!("GHOSTWRITER_OPLOG_ID environment variable not set"))?;
        let oplog_id = oplog_id.trim().parse::<i64>().map_err(|_| {
            anyhow::anyhow!("GHOSTWRITER_OPLOG_ID must be an integer, got {:?}", oplog_id)
        })?;

        let api_token = lookup("GHOSTWRITER_API_KEY")
            .ok_or_else(|| anyhow::anyhow!("GHOSTWRITER_API_KEY environment variable not set"))?;

        let source_host = lookup("OPLOG_SOURCE_HOST").unwrap_or_default();
        let operator_name = lookup("OPLOG_OPERATOR").unwrap_or_default();

        let insecure_skip_verify = lookup("GHOSTWRITER_INSECURE_SKIP_VERIFY")
            .map(|s| parse_flag(&s))
            .unwrap_or(false);

        Ok(Self {
            ghostwriter_url,
            oplog_id,
            api_token,
            source_host,
            operator_name,
            insecure_skip_verify,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.ghostwriter_url.is_empty() {
            anyhow::bail!("ghostwriter_url cannot be empty");
        }

        if !self.ghostwriter_url.starts_with("http://")
            && !self.ghostwriter_url.starts_with("https://")
        {
            anyhow::bail!("ghostwriter_url must start with http:// or https://");
        }

        if self.oplog_id <= 0 {
            anyhow::bail!("oplog_id must be greater than 0");
        }

        if self.api_token.trim().is_empty() {
            anyhow::bail!("api_token cannot be empty");
        }

        Ok(())
    }

    /// Values stamped onto every extracted entry
    pub fn entry_source(&self) -> EntrySource {
        EntrySource::new(self.source_host.clone(), self.oplog_id)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("ghostwriter_url", &self.ghostwriter_url)
            .field("oplog_id", &self.oplog_id)
            .field("api_token", &"<redacted>")
            .field("source_host", &self.source_host)
            .field("operator_name", &self.operator_name)
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .finish()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            ("GHOSTWRITER_URL", "https://gw.local"),
            ("GHOSTWRITER_OPLOG_ID", "4"),
            ("GHOSTWRITER_API_KEY", "token"),
        ]
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = Config::from_lookup(lookup(&required())).unwrap();

        assert_eq!(config.ghostwriter_url, "https://gw.local");
        assert_eq!(config.oplog_id, 4);
        assert_eq!(config.source_host, "");
        assert_eq!(config.operator_name, "");
        assert!(!config.insecure_skip_verify);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_optional_values() {
        let mut pairs = required();
        pairs.push(("OPLOG_SOURCE_HOST", "WS01"));
        pairs.push(("OPLOG_OPERATOR", "alice"));
        pairs.push(("GHOSTWRITER_INSECURE_SKIP_VERIFY", "True"));

        let config = Config::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.entry_source(), EntrySource::new("WS01", 4));
        assert_eq!(config.operator_name, "alice");
        assert!(config.insecure_skip_verify);
    }

    #[test]
    fn test_missing_required_values() {
        for missing in ["GHOSTWRITER_URL", "GHOSTWRITER_OPLOG_ID", "GHOSTWRITER_API_KEY"] {
            let pairs: Vec<_> = required().into_iter().filter(|(k, _)| *k != missing).collect();
            let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(err.to_string().contains(missing));
        }
    }

    #[test]
    fn test_oplog_id_must_be_integer() {
        let mut pairs = required();
        pairs.retain(|(k, _)| *k != "GHOSTWRITER_OPLOG_ID");
        pairs.push(("GHOSTWRITER_OPLOG_ID", "abc"));
        assert!(Config::from_lookup(lookup(&pairs)).is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::from_lookup(lookup(&required())).unwrap();

        // Valid config should pass
        assert!(config.validate().is_ok());

        // Invalid URL should fail
        config.ghostwriter_url = "gw.local".to_string();
        assert!(config.validate().is_err());
        config.ghostwriter_url = "https://gw.local".to_string();

        // Non-positive oplog should fail
        config.oplog_id = 0;
        assert!(config.validate().is_err());
        config.oplog_id = 1;

        // Blank token should fail
        config.api_token = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let mut config = Config::from_lookup(lookup(&required())).unwrap();
        config.api_token = "s3cr3t-value".to_string();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("s3cr3t-value"));
        assert!(debug.contains("<redacted>"));
    }
}
