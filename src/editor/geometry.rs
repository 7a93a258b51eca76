//! Pure geometry for region editing: coordinate mapping and drag math.
//!
//! Everything here is a pure function over [`RegionBox`] values in natural
//! (image-pixel) coordinates. The only bridge to the screen is
//! [`DisplayMetrics`], the scale/padding pair published by the viewer.
//!
//! Callers must check `DisplayMetrics::is_renderable` (and that the natural
//! dimensions are finite and positive) before invoking the mapping; for any
//! `scale > 0` the mapping is invertible.

use bevy::prelude::Vec2;

use crate::common::{Corner, DragKind};
use crate::constants::MIN_REGION_SIZE;
use crate::findings::RegionBox;
use crate::viewer::DisplayMetrics;

/// Map a natural-space region to display space. Positions get padding plus
/// scale; width/height scale only.
pub fn natural_to_display(area: &RegionBox, metrics: &DisplayMetrics) -> RegionBox {
    let pos = natural_point_to_display(Vec2::new(area.x, area.y), metrics);
    RegionBox {
        x: pos.x,
        y: pos.y,
        width: area.width * metrics.scale,
        height: area.height * metrics.scale,
    }
}

/// Position of a region's corner, in the region's own coordinate space.
pub fn corner_point(area: &RegionBox, corner: Corner) -> Vec2 {
    match corner {
        Corner::Nw => Vec2::new(area.x, area.y),
        Corner::Ne => Vec2::new(area.right(), area.y),
        Corner::Sw => Vec2::new(area.x, area.bottom()),
        Corner::Se => Vec2::new(area.right(), area.bottom()),
    }
}

/// Map a natural-space point to display space.
pub fn natural_point_to_display(point: Vec2, metrics: &DisplayMetrics) -> Vec2 {
    metrics.padding + point * metrics.scale
}

/// Inverse of [`natural_point_to_display`].
pub fn display_point_to_natural(point: Vec2, metrics: &DisplayMetrics) -> Vec2 {
    display_delta_to_natural(point - metrics.padding, metrics.scale)
}

/// Convert a display-space delta to a natural-space delta. Deltas carry no
/// padding component, only scale.
pub fn display_delta_to_natural(delta: Vec2, scale: f32) -> Vec2 {
    delta / scale
}

/// Apply a drag delta (natural space) to the gesture's starting region.
///
/// The result is unclamped; feed it through [`clamp_area`]. A zero delta
/// returns `start` unchanged for every drag kind.
pub fn compute_new_area(kind: DragKind, start: RegionBox, dx: f32, dy: f32) -> RegionBox {
    let mut area = start;
    match kind {
        DragKind::Move => {
            area.x += dx;
            area.y += dy;
        }
        DragKind::Resize(Corner::Nw) => {
            area.x += dx;
            area.y += dy;
            area.width -= dx;
            area.height -= dy;
        }
        DragKind::Resize(Corner::Ne) => {
            area.y += dy;
            area.width += dx;
            area.height -= dy;
        }
        DragKind::Resize(Corner::Sw) => {
            area.x += dx;
            area.width -= dx;
            area.height += dy;
        }
        DragKind::Resize(Corner::Se) => {
            area.width += dx;
            area.height += dy;
        }
    }
    area
}

/// Clamp a region to the image bounds and the minimum size.
///
/// Position is clamped first, then size against the remaining room, so a
/// region can never extend past the image or shrink below
/// [`MIN_REGION_SIZE`]. A resize that would invert the box saturates at the
/// minimum size instead of flipping which corner is anchored.
pub fn clamp_area(area: RegionBox, natural: Vec2) -> RegionBox {
    let max_x = (natural.x - MIN_REGION_SIZE).max(0.0);
    let max_y = (natural.y - MIN_REGION_SIZE).max(0.0);

    let x = area.x.clamp(0.0, max_x);
    let y = area.y.clamp(0.0, max_y);
    let width = area.width.clamp(MIN_REGION_SIZE, (natural.x - x).max(MIN_REGION_SIZE));
    let height = area.height.clamp(MIN_REGION_SIZE, (natural.y - y).max(MIN_REGION_SIZE));

    RegionBox {
        x,
        y,
        width,
        height,
    }
}

/// Check that a region satisfies the post-clamp invariants for the given
/// image dimensions.
#[cfg(test)]
pub fn satisfies_invariants(area: &RegionBox, natural: Vec2) -> bool {
    area.x >= 0.0
        && area.y >= 0.0
        && area.width >= MIN_REGION_SIZE
        && area.height >= MIN_REGION_SIZE
        && area.right() <= natural.x
        && area.bottom() <= natural.y
}
