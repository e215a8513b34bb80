//! Created/updated stamps carried by every persisted entity.

use crate::environment::Clock;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who created or last changed a row, and when.
///
/// `created_by` and `updated_by` hold the service name (`ACCOUNTS_MS`,
/// `CARDS_MS`, `LOANS_MS`); there is no end-user identity in this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    /// When the row was inserted.
    pub created_at: DateTime<Utc>,
    /// Service that inserted the row.
    pub created_by: String,
    /// When the row was last updated, if ever.
    pub updated_at: Option<DateTime<Utc>>,
    /// Service that last updated the row, if ever.
    pub updated_by: Option<String>,
}

impl Audit {
    /// Stamp for a new row.
    #[must_use]
    pub fn created(clock: &dyn Clock, auditor: &str) -> Self {
        Self {
            created_at: clock.now(),
            created_by: auditor.to_string(),
            updated_at: None,
            updated_by: None,
        }
    }

    /// Record an update.
    pub fn touch(&mut self, clock: &dyn Clock, auditor: &str) {
        self.updated_at = Some(clock.now());
        self.updated_by = Some(auditor.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Fixed(DateTime<Utc>);

    impl Clock for Fixed {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn touch_keeps_creation_stamp() {
        let t0 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();

        let mut audit = Audit::created(&Fixed(t0), "ACCOUNTS_MS");
        assert_eq!(audit.updated_at, None);

        audit.touch(&Fixed(t1), "ACCOUNTS_MS");
        assert_eq!(audit.created_at, t0);
        assert_eq!(audit.updated_at, Some(t1));
        assert_eq!(audit.updated_by.as_deref(), Some("ACCOUNTS_MS"));
    }
}
