//! Record of a ladder fallback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Emitted whenever a tier fails and a lower rung answers instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegradationEvent {
    /// The component that degraded ("semantic-index", "structured-store", …).
    pub component: String,
    /// What went wrong in the failing tier.
    pub failure: String,
    /// The tier that answered instead.
    pub fallback_used: String,
    pub timestamp: DateTime<Utc>,
}

impl DegradationEvent {
    pub fn new(
        component: impl Into<String>,
        failure: impl Into<String>,
        fallback_used: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            failure: failure.into(),
            fallback_used: fallback_used.into(),
            timestamp: Utc::now(),
        }
    }
}
