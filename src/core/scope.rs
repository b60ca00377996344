//! Scope containment for façade-level filtering
//!
//! A [`Scope`] is a filter token attached to a [`Logger`](super::Logger). Every
//! call carries a scope of its own, and the call is only admitted when the
//! façade's scope contains it.
//!
//! Scopes are compared through a capability rather than by type: a scope that
//! exposes a threshold level can be compared against level-based scopes, and
//! anything else is never contained.

use super::level::Level;
use std::fmt;

pub trait Scope: fmt::Debug + Send + Sync {
    /// Threshold level carried by this scope, if it is level-based.
    fn level(&self) -> Option<Level> {
        None
    }

    /// Whether `other` is admissible under this scope.
    ///
    /// Must be reflexive for scopes that can compare against themselves,
    /// and must return `false` (never panic) for scopes it does not recognise.
    fn contains(&self, other: &dyn Scope) -> bool;
}

/// Level-based scope: contains every scope whose level is at or above its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LevelScope {
    level: Level,
}

impl LevelScope {
    pub const fn new(level: Level) -> Self {
        Self { level }
    }

    pub fn threshold(&self) -> Level {
        self.level
    }
}

impl From<Level> for LevelScope {
    fn from(level: Level) -> Self {
        Self::new(level)
    }
}

impl Scope for LevelScope {
    fn level(&self) -> Option<Level> {
        Some(self.level)
    }

    fn contains(&self, other: &dyn Scope) -> bool {
        match other.level() {
            Some(level) => self.level <= level,
            None => false,
        }
    }
}
