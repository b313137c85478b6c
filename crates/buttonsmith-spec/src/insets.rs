//! Slice and padding insets.

use serde::{Deserialize, Serialize};

/// One side of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Edge::Top => "top",
            Edge::Right => "right",
            Edge::Bottom => "bottom",
            Edge::Left => "left",
        }
    }
}

/// Nine-slice boundaries, in source pixels from each edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SliceInsets {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl SliceInsets {
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same inset on every side.
    pub const fn uniform(value: u32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn get(&self, edge: Edge) -> u32 {
        match edge {
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
        }
    }

    pub fn with(mut self, edge: Edge, value: u32) -> Self {
        match edge {
            Edge::Top => self.top = value,
            Edge::Right => self.right = value,
            Edge::Bottom => self.bottom = value,
            Edge::Left => self.left = value,
        }
        self
    }

    /// Clamp the insets to a source of `width` x `height` pixels.
    ///
    /// Each inset is limited to its axis dimension, then right and bottom are
    /// reduced so that `left + right <= width` and `top + bottom <= height`.
    /// Left and top are never reduced by the pairwise clamp.
    pub fn normalized(&self, width: u32, height: u32) -> SliceInsets {
        let left = self.left.min(width);
        let top = self.top.min(height);
        let right = self.right.min(width).min(width - left);
        let bottom = self.bottom.min(height).min(height - top);
        SliceInsets {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Smallest canvas that can hold the fixed-size corners.
    pub fn min_size(&self) -> (u32, u32) {
        (
            self.left.saturating_add(self.right),
            self.top.saturating_add(self.bottom),
        )
    }
}

/// Text-safe inner box, in canvas pixels from each edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PaddingInsets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl PaddingInsets {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn get(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
        }
    }

    pub fn with(mut self, edge: Edge, value: f64) -> Self {
        match edge {
            Edge::Top => self.top = value,
            Edge::Right => self.right = value,
            Edge::Bottom => self.bottom = value,
            Edge::Left => self.left = value,
        }
        self
    }

    /// Replace negative or non-finite sides with zero.
    pub fn sanitized(&self) -> PaddingInsets {
        let fix = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        PaddingInsets::new(fix(self.top), fix(self.right), fix(self.bottom), fix(self.left))
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}
