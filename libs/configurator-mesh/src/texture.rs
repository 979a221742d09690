//! # Textures
//!
//! Texture roles and a load-once cache of backend texture handles.

use config::constants::{HDRI_TEXTURE_URL, UV_TEST_TEXTURE_URL};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What a material wants to show on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextureRole {
    /// Checker grid for inspecting the UV layout.
    UvTest,
    /// Studio environment map.
    Environment,
}

impl TextureRole {
    /// Source the host loads this texture from.
    pub fn source_url(self) -> &'static str {
        match self {
            TextureRole::UvTest => UV_TEST_TEXTURE_URL,
            TextureRole::Environment => HDRI_TEXTURE_URL,
        }
    }
}

/// Opaque identifier of a texture owned by the render backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Loaded textures keyed by role.
///
/// Each role is loaded at most once; a missing entry means the texture is
/// not available yet and materials fall back to their base color.
///
/// # Example
///
/// ```rust
/// use configurator_mesh::texture::{TextureCache, TextureHandle, TextureRole};
///
/// let mut cache = TextureCache::new();
/// let handle = cache
///     .get_or_load(TextureRole::UvTest, |_url| Ok::<_, ()>(TextureHandle(7)))
///     .unwrap();
/// assert_eq!(cache.get(TextureRole::UvTest), Some(handle));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextureCache {
    entries: HashMap<TextureRole, TextureHandle>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached handle of a role.
    pub fn get(&self, role: TextureRole) -> Option<TextureHandle> {
        self.entries.get(&role).copied()
    }

    /// Returns the cached handle, invoking `load` with the role's source URL
    /// on the first request only.
    ///
    /// A failed load leaves the cache untouched so a later call retries.
    pub fn get_or_load<F, E>(&mut self, role: TextureRole, load: F) -> Result<TextureHandle, E>
    where
        F: FnOnce(&'static str) -> Result<TextureHandle, E>,
    {
        if let Some(handle) = self.get(role) {
            return Ok(handle);
        }
        let handle = load(role.source_url())?;
        self.entries.insert(role, handle);
        Ok(handle)
    }

    /// Stores a handle delivered by an asynchronous loader.
    pub fn insert(&mut self, role: TextureRole, handle: TextureHandle) -> Option<TextureHandle> {
        self.entries.insert(role, handle)
    }

    /// Forgets every handle.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Removes and yields every cached handle, so the caller can free them.
    pub fn drain(&mut self) -> impl Iterator<Item = (TextureRole, TextureHandle)> + '_ {
        self.entries.drain()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_have_distinct_sources() {
        assert_ne!(
            TextureRole::UvTest.source_url(),
            TextureRole::Environment.source_url()
        );
    }

    #[test]
    fn test_get_or_load_loads_once() {
        let mut cache = TextureCache::new();
        let mut loads = 0;

        for _ in 0..3 {
            let handle = cache
                .get_or_load(TextureRole::Environment, |url| {
                    loads += 1;
                    assert!(url.ends_with(".hdr"));
                    Ok::<_, String>(TextureHandle(1))
                })
                .unwrap();
            assert_eq!(handle, TextureHandle(1));
        }

        assert_eq!(loads, 1);
    }

    #[test]
    fn test_drain_empties_cache() {
        let mut cache = TextureCache::new();
        cache.insert(TextureRole::UvTest, TextureHandle(3));
        cache.insert(TextureRole::Environment, TextureHandle(4));

        let mut drained: Vec<u64> = cache.drain().map(|(_, handle)| handle.0).collect();
        drained.sort_unstable();

        assert_eq!(drained, vec![3, 4]);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let mut cache = TextureCache::new();
        let result = cache.get_or_load(TextureRole::UvTest, |_| Err("offline"));
        assert_eq!(result, Err("offline"));
        assert!(cache.get(TextureRole::UvTest).is_none());

        let handle = cache
            .get_or_load(TextureRole::UvTest, |_| Ok::<_, &str>(TextureHandle(2)))
            .unwrap();
        assert_eq!(handle, TextureHandle(2));
    }

    #[test]
    fn test_insert_and_clear() {
        let mut cache = TextureCache::new();
        assert_eq!(cache.insert(TextureRole::UvTest, TextureHandle(3)), None);
        assert_eq!(
            cache.insert(TextureRole::UvTest, TextureHandle(4)),
            Some(TextureHandle(3))
        );
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
