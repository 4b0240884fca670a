//! Geometry and viewport management.
//!
//! This module handles:
//! - Per-axis sizes with pre-computed cumulative positions
//! - Viewport state (scroll offsets, client size, scrollbar ranges)
//! - Binary search for cell lookup at screen coordinates
//! - Fixed/frozen aware screen placement

mod extents;
mod viewport;

pub use extents::Extents;
pub(crate) use viewport::Axis;
pub use viewport::{Geometry, Rect, ScrollRanges, Viewport, DEFAULT_SCROLLBAR_THICKNESS};
