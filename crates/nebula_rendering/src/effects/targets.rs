//! Cached target point sets.
//!
//! The shaped set is keyed by `(shape, count, text)`; the idle set by count
//! alone. Both are replaced wholesale, never patched.

use nebula_procedural::PointSet;
use nebula_shared::{SceneConfig, ShapeKind};

/// Identity of a shaped point set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShapeKey {
    /// Shape family.
    pub kind: ShapeKind,
    /// Number of points.
    pub count: usize,
    /// Text content (only rendered for `ShapeKind::Text`).
    pub text: String,
}

impl ShapeKey {
    /// Creates a key.
    #[must_use]
    pub fn new(kind: ShapeKind, count: usize, text: impl Into<String>) -> Self {
        Self {
            kind,
            count,
            text: text.into(),
        }
    }

    /// Key for the shaped set a configuration needs.
    #[must_use]
    pub fn for_config(config: &SceneConfig) -> Self {
        Self::new(config.shape, config.particle_count, config.text.as_str())
    }
}

/// A generated shaped set, tagged with the request that produced it.
#[derive(Clone, Debug)]
pub struct ShapeTargets {
    /// What was generated.
    pub key: ShapeKey,
    /// Request generation, monotonically increasing per regenerator.
    pub generation: u64,
    /// The points, `key.count` long.
    pub points: PointSet,
}

/// Shaped + idle target sets for the current configuration.
#[derive(Clone, Debug, Default)]
pub struct TargetCache {
    shaped_key: Option<ShapeKey>,
    shaped: PointSet,
    idle: PointSet,
}

impl TargetCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Key of the installed shaped set.
    #[must_use]
    pub fn shaped_key(&self) -> Option<&ShapeKey> {
        self.shaped_key.as_ref()
    }

    /// True if the shaped set was generated for `key`.
    #[must_use]
    pub fn is_current(&self, key: &ShapeKey) -> bool {
        self.shaped_key.as_ref() == Some(key)
    }

    /// Shaped target set.
    #[must_use]
    pub fn shaped(&self) -> &PointSet {
        &self.shaped
    }

    /// Idle / dispersal reference set.
    #[must_use]
    pub fn idle(&self) -> &PointSet {
        &self.idle
    }

    /// Replaces the shaped set. Returns false (and keeps the old set) if the
    /// point count does not match the key.
    pub fn install_shaped(&mut self, key: ShapeKey, points: PointSet) -> bool {
        if points.len() != key.count {
            return false;
        }
        self.shaped_key = Some(key);
        self.shaped = points;
        true
    }

    /// Replaces the idle set.
    pub fn install_idle(&mut self, points: PointSet) {
        self.idle = points;
    }

    /// True if both sets have `count` points.
    #[must_use]
    pub fn is_aligned(&self, count: usize) -> bool {
        self.shaped.len() == count && self.idle.len() == count
    }
}
