//! Adapter health reporting types.

use crate::enums::Domain;
use serde::{Deserialize, Serialize};

/// Health status for an adapter or component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Fully operational
    Healthy,
    /// Operational but degraded (e.g. serving demo data)
    Degraded,
    /// Not operational
    Unhealthy,
    /// Not yet probed
    Unknown,
}

/// Result of probing one adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: HealthStatus,
    pub domain: Domain,
    pub message: Option<String>,
    pub response_time_ms: Option<i64>,
}

impl HealthCheck {
    /// A healthy probe result.
    pub fn healthy(domain: Domain) -> Self {
        Self {
            status: HealthStatus::Healthy,
            domain,
            message: None,
            response_time_ms: None,
        }
    }

    /// A degraded probe result.
    pub fn degraded(domain: Domain, message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Degraded,
            domain,
            message: Some(message.into()),
            response_time_ms: None,
        }
    }

    /// An unhealthy probe result carrying the causing error.
    pub fn unhealthy(domain: Domain, message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            domain,
            message: Some(message.into()),
            response_time_ms: None,
        }
    }

    /// Set the probe response time.
    pub fn with_response_time(mut self, ms: i64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }
}
