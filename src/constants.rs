//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1400.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Smallest side a finding region may be shrunk to, in natural image pixels.
/// Resizes that would go below this are clamped, never rejected.
pub const MIN_REGION_SIZE: f32 = 10.0;

/// Hit radius around a corner handle, in display pixels
pub const HANDLE_HIT_RADIUS: f32 = 8.0;

/// Half-size of the drawn corner handle squares, in display pixels
pub const HANDLE_DRAW_SIZE: f32 = 4.0;

/// Extra display pixels around a region that still count as its own
/// hit-region for outside-click purposes
pub const REGION_HIT_MARGIN: f32 = 8.0;

/// Maximum delay between two clicks for them to count as a double-click
pub const DOUBLE_CLICK_SECS: f32 = 0.35;

/// How long the "saved" badge stays up before reverting to idle
pub const SAVED_BADGE_SECS: f32 = 2.0;

/// Maximum number of recent review documents to remember in config
pub const MAX_RECENT_REVIEWS: usize = 5;
