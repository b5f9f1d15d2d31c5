//! Avatar records and their store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use avatarforge_core::{DomainError, DomainResult};
use avatarforge_progression::Progression;

/// The subset of an avatar entity this backend owns.
///
/// Addressed by slug (unique, lowercase). The progression transition
/// functions live in `avatarforge-progression`; this record just carries the
/// state between reads and writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarRecord {
    pub slug: String,
    pub name: String,
    /// Presentation style used by the dialogue templates (e.g. "cartoon").
    pub style: String,
    #[serde(flatten)]
    pub progression: Progression,
    pub unlocked_by_default: bool,
}

impl AvatarRecord {
    pub fn new(name: &str, style: &str) -> Self {
        Self {
            slug: slugify(name),
            name: name.to_string(),
            style: style.to_string(),
            progression: Progression::new(),
            unlocked_by_default: false,
        }
    }
}

/// Basic slug generator: lowercase, spaces to dashes, ascii alnum only.
pub fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}

/// Keyed record store for avatar records. Last-write-wins updates.
pub trait AvatarStore: Send + Sync {
    fn find_by_slug(&self, slug: &str) -> Option<AvatarRecord>;
    /// Fails with `Conflict` if the slug is already present.
    fn insert(&self, record: AvatarRecord) -> DomainResult<()>;
    /// Replace the stored record. Fails with `NotFound` if absent.
    fn update(&self, record: AvatarRecord) -> DomainResult<()>;
    fn delete(&self, slug: &str) -> DomainResult<()>;
    fn list(&self) -> Vec<AvatarRecord>;
}

impl<S> AvatarStore for Arc<S>
where
    S: AvatarStore + ?Sized,
{
    fn find_by_slug(&self, slug: &str) -> Option<AvatarRecord> {
        (**self).find_by_slug(slug)
    }

    fn insert(&self, record: AvatarRecord) -> DomainResult<()> {
        (**self).insert(record)
    }

    fn update(&self, record: AvatarRecord) -> DomainResult<()> {
        (**self).update(record)
    }

    fn delete(&self, slug: &str) -> DomainResult<()> {
        (**self).delete(slug)
    }

    fn list(&self) -> Vec<AvatarRecord> {
        (**self).list()
    }
}

/// In-memory avatar store for dev/test.
#[derive(Debug, Default)]
pub struct InMemoryAvatarStore {
    inner: RwLock<HashMap<String, AvatarRecord>>,
}

impl InMemoryAvatarStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AvatarStore for InMemoryAvatarStore {
    fn find_by_slug(&self, slug: &str) -> Option<AvatarRecord> {
        let map = self.inner.read().ok()?;
        map.get(slug).cloned()
    }

    fn insert(&self, record: AvatarRecord) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("avatar store poisoned"))?;
        if map.contains_key(&record.slug) {
            return Err(DomainError::conflict("avatar slug already exists"));
        }
        map.insert(record.slug.clone(), record);
        Ok(())
    }

    fn update(&self, record: AvatarRecord) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("avatar store poisoned"))?;
        if !map.contains_key(&record.slug) {
            return Err(DomainError::NotFound);
        }
        map.insert(record.slug.clone(), record);
        Ok(())
    }

    fn delete(&self, slug: &str) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("avatar store poisoned"))?;
        map.remove(slug).map(|_| ()).ok_or(DomainError::NotFound)
    }

    fn list(&self) -> Vec<AvatarRecord> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_normalizes() {
        assert_eq!(slugify("Neon Sage"), "neon-sage");
        assert_eq!(slugify("  Dr. Byte!  "), "dr-byte");
        assert_eq!(slugify("ALL CAPS 9"), "all-caps-9");
    }

    #[test]
    fn new_record_starts_unlevelled_and_locked() {
        let rec = AvatarRecord::new("Neon Sage", "cyberpunk");
        assert_eq!(rec.slug, "neon-sage");
        assert_eq!(rec.progression, Progression::new());
        assert!(!rec.unlocked_by_default);
    }

    #[test]
    fn insert_conflicts_on_duplicate_slug() {
        let store = InMemoryAvatarStore::new();
        store.insert(AvatarRecord::new("Neon Sage", "cyberpunk")).unwrap();

        let err = store
            .insert(AvatarRecord::new("Neon Sage", "cartoon"))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn update_is_last_write_wins() {
        let store = InMemoryAvatarStore::new();
        let mut rec = AvatarRecord::new("Neon Sage", "cyberpunk");
        store.insert(rec.clone()).unwrap();

        rec.progression.add_xp(130);
        store.update(rec).unwrap();

        let got = store.find_by_slug("neon-sage").unwrap();
        assert_eq!(got.progression.level, 2);
        assert_eq!(got.progression.xp, 30);
    }

    #[test]
    fn progression_fields_flatten_into_the_record() {
        let rec = AvatarRecord::new("Neon Sage", "cyberpunk");
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["level"], 1);
        assert_eq!(json["xp"], 0);
    }
}
