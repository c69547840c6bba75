//! Session lifetime configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// How long idle practice sessions are kept
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Seconds without activity after which a session is discarded
    #[serde(default = "default_idle_ttl")]
    pub idle_ttl_secs: u64,

    /// Seconds between idle-session sweeps
    #[serde(default = "default_purge_interval")]
    pub purge_interval_secs: u64,
}

impl SessionConfig {
    pub fn idle_ttl(&self) -> Duration {
        Duration::from_secs(self.idle_ttl_secs)
    }

    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.purge_interval_secs)
    }

    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.idle_ttl_secs == 0 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if self.purge_interval_secs == 0 {
            return Err(ValidationError::InvalidPurgeInterval);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl_secs: default_idle_ttl(),
            purge_interval_secs: default_purge_interval(),
        }
    }
}

fn default_idle_ttl() -> u64 {
    3600
}

fn default_purge_interval() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.idle_ttl(), Duration::from_secs(3600));
        assert_eq!(config.purge_interval(), Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_values_are_rejected() {
        let config = SessionConfig {
            idle_ttl_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidSessionTtl));

        let config = SessionConfig {
            purge_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPurgeInterval));
    }
}
