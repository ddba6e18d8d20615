//! Configuration types

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default context snapshot time-to-live in seconds.
pub const DEFAULT_CONTEXT_TTL_SECS: u64 = 30;
/// Default payment amount above which Administrator approval is required.
pub const DEFAULT_PAYMENT_APPROVAL_THRESHOLD: f64 = 1000.0;
/// Default number of days ahead an operator may schedule without Manager role.
pub const DEFAULT_ADVANCE_LIMIT_DAYS: i64 = 30;
/// Default rollback snapshot store capacity.
pub const DEFAULT_ROLLBACK_CAPACITY: usize = 256;
/// Default rollback snapshot retention in seconds.
pub const DEFAULT_ROLLBACK_TTL_SECS: u64 = 3600;
/// Default horizon over which result freshness decays to zero, in seconds.
pub const DEFAULT_FRESHNESS_HORIZON_SECS: u64 = 300;

/// What happens when one query in a parallel phase fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseFailurePolicy {
    /// First failure surfaces as the phase's failure; sibling results are
    /// discarded. Matches the original system.
    FailFast,
    /// Per-query failures become failure envelopes in the result set and
    /// aggregation decides what survives.
    CollectPartial,
}

/// Master configuration for the orchestration layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// How long a context snapshot stays valid for a (user, session) key
    pub context_ttl: Duration,
    pub failure_policy: PhaseFailurePolicy,
    /// Optional per-domain-query timeout. None leaves timeout policy to the
    /// transport layer, matching the original system.
    pub query_timeout: Option<Duration>,
    /// Payments above this amount require Administrator role
    pub payment_approval_threshold: f64,
    /// Scheduling further ahead than this requires Manager role
    pub advance_limit_days: i64,
    /// Maximum retained rollback snapshots
    pub rollback_capacity: usize,
    /// Rollback snapshot retention
    pub rollback_ttl: Duration,
    /// Horizon over which freshness decays linearly from 1.0 to 0.0
    pub freshness_horizon: Duration,
    /// Confidence assigned when a domain's native scale is unrecognized
    pub default_confidence: f32,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            context_ttl: Duration::from_secs(DEFAULT_CONTEXT_TTL_SECS),
            failure_policy: PhaseFailurePolicy::FailFast,
            query_timeout: None,
            payment_approval_threshold: DEFAULT_PAYMENT_APPROVAL_THRESHOLD,
            advance_limit_days: DEFAULT_ADVANCE_LIMIT_DAYS,
            rollback_capacity: DEFAULT_ROLLBACK_CAPACITY,
            rollback_ttl: Duration::from_secs(DEFAULT_ROLLBACK_TTL_SECS),
            freshness_horizon: Duration::from_secs(DEFAULT_FRESHNESS_HORIZON_SECS),
            default_confidence: crate::confidence::DEFAULT_CONFIDENCE,
        }
    }
}

impl OrchestratorConfig {
    /// Validate the configuration.
    /// Returns Ok(()) if valid, Err(ConfigError) if invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.context_ttl.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "context_ttl".to_string(),
                value: format!("{:?}", self.context_ttl),
                reason: "context_ttl must be positive".to_string(),
            });
        }

        if self.payment_approval_threshold < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "payment_approval_threshold".to_string(),
                value: self.payment_approval_threshold.to_string(),
                reason: "payment_approval_threshold must be non-negative".to_string(),
            });
        }

        if self.advance_limit_days <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "advance_limit_days".to_string(),
                value: self.advance_limit_days.to_string(),
                reason: "advance_limit_days must be greater than 0".to_string(),
            });
        }

        if self.rollback_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rollback_capacity".to_string(),
                value: self.rollback_capacity.to_string(),
                reason: "rollback_capacity must be greater than 0".to_string(),
            });
        }

        if self.rollback_ttl.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "rollback_ttl".to_string(),
                value: format!("{:?}", self.rollback_ttl),
                reason: "rollback_ttl must be positive".to_string(),
            });
        }

        if self.freshness_horizon.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "freshness_horizon".to_string(),
                value: format!("{:?}", self.freshness_horizon),
                reason: "freshness_horizon must be positive".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.default_confidence) {
            return Err(ConfigError::InvalidValue {
                field: "default_confidence".to_string(),
                value: self.default_confidence.to_string(),
                reason: "default_confidence must be between 0.0 and 1.0".to_string(),
            });
        }

        if let Some(timeout) = self.query_timeout {
            if timeout.is_zero() {
                return Err(ConfigError::InvalidValue {
                    field: "query_timeout".to_string(),
                    value: format!("{timeout:?}"),
                    reason: "query_timeout must be positive when set".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Create a configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `SWITCHBOARD_CONTEXT_TTL_SECS`: context snapshot TTL (default: 30)
    /// - `SWITCHBOARD_FAILURE_POLICY`: `fail_fast` or `collect_partial` (default: fail_fast)
    /// - `SWITCHBOARD_QUERY_TIMEOUT_MS`: per-query timeout, unset = none
    /// - `SWITCHBOARD_PAYMENT_APPROVAL_THRESHOLD`: admin-approval amount (default: 1000.0)
    /// - `SWITCHBOARD_ADVANCE_LIMIT_DAYS`: manager-approval horizon (default: 30)
    /// - `SWITCHBOARD_ROLLBACK_CAPACITY`: snapshot store capacity (default: 256)
    /// - `SWITCHBOARD_ROLLBACK_TTL_SECS`: snapshot retention (default: 3600)
    /// - `SWITCHBOARD_FRESHNESS_HORIZON_SECS`: freshness decay horizon (default: 300)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let context_ttl = Duration::from_secs(
            std::env::var("SWITCHBOARD_CONTEXT_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CONTEXT_TTL_SECS),
        );

        let failure_policy = match std::env::var("SWITCHBOARD_FAILURE_POLICY").as_deref() {
            Ok("collect_partial") => PhaseFailurePolicy::CollectPartial,
            _ => PhaseFailurePolicy::FailFast,
        };

        let query_timeout = std::env::var("SWITCHBOARD_QUERY_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis);

        let payment_approval_threshold = std::env::var("SWITCHBOARD_PAYMENT_APPROVAL_THRESHOLD")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PAYMENT_APPROVAL_THRESHOLD);

        let advance_limit_days = std::env::var("SWITCHBOARD_ADVANCE_LIMIT_DAYS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_ADVANCE_LIMIT_DAYS);

        let rollback_capacity = std::env::var("SWITCHBOARD_ROLLBACK_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_ROLLBACK_CAPACITY);

        let rollback_ttl = Duration::from_secs(
            std::env::var("SWITCHBOARD_ROLLBACK_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_ROLLBACK_TTL_SECS),
        );

        let freshness_horizon = Duration::from_secs(
            std::env::var("SWITCHBOARD_FRESHNESS_HORIZON_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_FRESHNESS_HORIZON_SECS),
        );

        Self {
            context_ttl,
            failure_policy,
            query_timeout,
            payment_approval_threshold,
            advance_limit_days,
            rollback_capacity,
            rollback_ttl,
            freshness_horizon,
            default_confidence: defaults.default_confidence,
        }
    }
}
