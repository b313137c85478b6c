//! Interaction states and a per-state container.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Interaction state of a UI element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionState {
    Normal,
    Hover,
    Active,
}

impl InteractionState {
    /// All states in render order.
    pub const ALL: [InteractionState; 3] = [
        InteractionState::Normal,
        InteractionState::Hover,
        InteractionState::Active,
    ];

    /// Lowercase identifier used in style tokens, file names and snapshots.
    pub const fn as_str(&self) -> &'static str {
        match self {
            InteractionState::Normal => "normal",
            InteractionState::Hover => "hover",
            InteractionState::Active => "active",
        }
    }
}

impl fmt::Display for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized state name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown interaction state: {0:?} (expected normal, hover, or active)")]
pub struct ParseStateError(pub String);

impl FromStr for InteractionState {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(InteractionState::Normal),
            "hover" => Ok(InteractionState::Hover),
            "active" => Ok(InteractionState::Active),
            _ => Err(ParseStateError(s.to_string())),
        }
    }
}

/// One independently owned value per interaction state.
///
/// Values are never shared between states; cloning a `PerState` clones all
/// three entries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PerState<T> {
    pub normal: T,
    pub hover: T,
    pub active: T,
}

impl<T> PerState<T> {
    pub fn new(normal: T, hover: T, active: T) -> Self {
        Self {
            normal,
            hover,
            active,
        }
    }

    /// Build all three entries from a function of the state.
    pub fn from_fn(mut f: impl FnMut(InteractionState) -> T) -> Self {
        Self {
            normal: f(InteractionState::Normal),
            hover: f(InteractionState::Hover),
            active: f(InteractionState::Active),
        }
    }

    pub fn get(&self, state: InteractionState) -> &T {
        match state {
            InteractionState::Normal => &self.normal,
            InteractionState::Hover => &self.hover,
            InteractionState::Active => &self.active,
        }
    }

    pub fn get_mut(&mut self, state: InteractionState) -> &mut T {
        match state {
            InteractionState::Normal => &mut self.normal,
            InteractionState::Hover => &mut self.hover,
            InteractionState::Active => &mut self.active,
        }
    }

    /// Map each entry, keeping state association.
    pub fn map<U>(&self, mut f: impl FnMut(InteractionState, &T) -> U) -> PerState<U> {
        PerState::from_fn(|state| f(state, self.get(state)))
    }

    /// Iterate `(state, value)` pairs in render order.
    pub fn iter(&self) -> impl Iterator<Item = (InteractionState, &T)> {
        InteractionState::ALL
            .into_iter()
            .map(move |state| (state, self.get(state)))
    }
}
