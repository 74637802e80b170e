//! Cache Entry Module
//!
//! Defines a single cache entry with optional absolute expiry.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// == Cache Entry ==
/// A stored value plus its expiry metadata.
///
/// `expires_at == None` means the entry never expires. The expiry boundary is
/// inclusive: once `now >= expires_at` the entry is expired.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Absolute expiration time, None = never expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry expiring `ttl_seconds` from now. A TTL of zero means
    /// the entry never expires.
    ///
    /// TTLs too large for chrono's date range saturate to the maximum
    /// representable instant instead of overflowing.
    pub fn new(value: String, ttl_seconds: u64) -> Self {
        let now = Utc::now();
        let expires_at = if ttl_seconds > 0 {
            let seconds = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);
            let expires = Duration::try_seconds(seconds)
                .and_then(|ttl| now.checked_add_signed(ttl))
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            Some(expires)
        } else {
            None
        };

        Self {
            value,
            created_at: now,
            expires_at,
        }
    }

    /// Creates an entry with a pre-computed absolute expiry, as restored from a
    /// snapshot.
    pub fn with_expiry(value: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            value,
            created_at: Utc::now(),
            expires_at,
        }
    }

    // == Is Expired ==
    /// True once the current time has reached the expiry instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Expiry check against an explicit instant. The sweep and `list` evaluate
    /// many entries against one sampled clock value.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Remaining TTL in seconds. `Some(0)` if already expired, None if the
    /// entry never expires.
    pub fn ttl_remaining(&self) -> Option<u64> {
        self.expires_at.map(|expires| {
            let remaining = expires - Utc::now();
            remaining.num_seconds().max(0) as u64
        })
    }

    /// Copies the entry into its serializable snapshot form.
    pub fn to_record(&self) -> EntryRecord {
        EntryRecord {
            value: self.value.clone(),
            expiry: self.expires_at,
        }
    }
}

// == Entry Record ==
/// The snapshot/listing view of an entry: value plus optional RFC3339 expiry.
///
/// An absent `expiry` field means "never expires" and is distinct from an
/// expiry in the past, which marks an entry as dead during snapshot load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    /// The stored value
    pub value: String,
    /// Absolute expiration time, omitted when the entry never expires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_zero_ttl_never_expires() {
        let entry = CacheEntry::new("v".to_string(), 0);

        assert_eq!(entry.value, "v");
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
        assert!(entry.ttl_remaining().is_none());
    }

    #[test]
    fn test_entry_with_ttl_not_expired() {
        let entry = CacheEntry::new("v".to_string(), 60);

        assert!(entry.expires_at.is_some());
        assert!(!entry.is_expired());

        let remaining = entry.ttl_remaining().unwrap();
        assert!(remaining <= 60);
        assert!(remaining >= 59);
    }

    #[test]
    fn test_entry_huge_ttl_saturates_instead_of_panicking() {
        // Seconds values far beyond chrono's date range must not overflow.
        let entry = CacheEntry::new("v".to_string(), 10_000_000_000_000);
        assert_eq!(entry.expires_at, Some(DateTime::<Utc>::MAX_UTC));
        assert!(!entry.is_expired());

        let entry = CacheEntry::new("v".to_string(), u64::MAX);
        assert_eq!(entry.expires_at, Some(DateTime::<Utc>::MAX_UTC));
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiry_boundary_is_inclusive() {
        let now = Utc::now();
        let entry = CacheEntry::with_expiry("v".to_string(), Some(now));

        assert!(entry.is_expired_at(now));
    }

    #[test]
    fn test_entry_expired_in_past() {
        let past = Utc::now() - Duration::seconds(5);
        let entry = CacheEntry::with_expiry("v".to_string(), Some(past));

        assert!(entry.is_expired());
        assert_eq!(entry.ttl_remaining().unwrap(), 0);
    }

    #[test]
    fn test_entry_with_expiry_preserves_instant() {
        let expires = Utc::now() + Duration::seconds(120);
        let entry = CacheEntry::with_expiry("v".to_string(), Some(expires));

        assert_eq!(entry.expires_at, Some(expires));
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_record_serializes_expiry_as_rfc3339() {
        let expires = Utc::now() + Duration::seconds(30);
        let record = CacheEntry::with_expiry("v".to_string(), Some(expires)).to_record();

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("expiry"));

        let parsed: EntryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.value, "v");
        assert_eq!(parsed.expiry, Some(expires));
    }

    #[test]
    fn test_record_omits_absent_expiry() {
        let record = CacheEntry::new("v".to_string(), 0).to_record();

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("expiry"));

        let parsed: EntryRecord = serde_json::from_str(&json).unwrap();
        assert!(parsed.expiry.is_none());
    }
}
