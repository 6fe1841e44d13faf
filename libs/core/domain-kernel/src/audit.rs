use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who created an aggregate and who touched it last.
///
/// The stamp is a value: mutations produce a new `AuditInfo` through
/// [`AuditInfo::touched`] instead of editing fields in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditInfo {
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: DateTime<Utc>,
    pub updated_by: String,
}

impl AuditInfo {
    /// Stamp for a freshly created aggregate
    pub fn new(actor: impl Into<String>) -> Self {
        let actor = actor.into();
        let now = Utc::now();
        Self {
            created_at: now,
            created_by: actor.clone(),
            updated_at: now,
            updated_by: actor,
        }
    }

    /// Keep the creation half, restamp the update half
    pub fn touched(&self, actor: impl Into<String>) -> Self {
        Self {
            created_at: self.created_at,
            created_by: self.created_by.clone(),
            updated_at: Utc::now(),
            updated_by: actor.into(),
        }
    }
}
