//! The reviewed image sprite and its natural→display mapping.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::findings::{DocumentLoaded, ReviewDocument};

/// Natural (unscaled) pixel dimensions of the reviewed image, probed from
/// the file header without decoding the pixels.
#[derive(Resource, Default, Clone, Copy)]
pub struct NaturalDimensions(pub Option<Vec2>);

impl NaturalDimensions {
    pub fn get(&self) -> Option<Vec2> {
        self.0.filter(|d| {
            d.x.is_finite() && d.y.is_finite() && d.x > 0.0 && d.y > 0.0
        })
    }
}

/// The affine relationship between natural and display coordinates for the
/// currently rendered image: `display = padding + natural * scale`.
///
/// Width and height scale only; padding applies to positions.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct DisplayMetrics {
    pub scale: f32,
    pub padding: Vec2,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        // Zero scale marks "nothing laid out yet"; consumers must check
        // is_renderable before using the mapping.
        Self {
            scale: 0.0,
            padding: Vec2::ZERO,
        }
    }
}

impl DisplayMetrics {
    pub fn is_renderable(&self) -> bool {
        self.scale > 0.0 && self.scale.is_finite() && self.padding.x >= 0.0 && self.padding.y >= 0.0
    }
}

/// Contain-fit `natural` into `viewport`, centering with letterbox padding.
pub fn fit_metrics(natural: Vec2, viewport: Vec2) -> DisplayMetrics {
    if natural.x <= 0.0 || natural.y <= 0.0 || viewport.x <= 0.0 || viewport.y <= 0.0 {
        return DisplayMetrics::default();
    }

    let scale = (viewport.x / natural.x).min(viewport.y / natural.y);
    let padding = (viewport - natural * scale) / 2.0;
    DisplayMetrics { scale, padding }
}

/// Convert a display-space point (window coordinates, origin top-left,
/// y down) to bevy world coordinates for a centered, unmoved 2d camera.
pub fn display_to_world(display: Vec2, window_size: Vec2) -> Vec2 {
    Vec2::new(
        display.x - window_size.x / 2.0,
        window_size.y / 2.0 - display.y,
    )
}

/// Marker for the reviewed image sprite.
#[derive(Component)]
pub struct ReviewImage;

/// (Re)spawn the image sprite when a document is loaded.
pub fn sync_review_image(
    mut commands: Commands,
    mut events: MessageReader<DocumentLoaded>,
    document: Res<ReviewDocument>,
    asset_server: Res<AssetServer>,
    mut natural: ResMut<NaturalDimensions>,
    mut metrics: ResMut<DisplayMetrics>,
    existing: Query<Entity, With<ReviewImage>>,
) {
    for _ in events.read() {
        for entity in existing.iter() {
            commands.entity(entity).despawn();
        }
        natural.0 = None;
        *metrics = DisplayMetrics::default();

        let Some(image_path) = document.image_path.clone() else {
            continue;
        };

        match ::image::image_dimensions(&image_path) {
            Ok((w, h)) => {
                natural.0 = Some(Vec2::new(w as f32, h as f32));
                commands.spawn((
                    ReviewImage,
                    Sprite {
                        image: asset_server.load(image_path),
                        // custom_size is filled in once metrics are known
                        custom_size: Some(Vec2::ZERO),
                        ..default()
                    },
                    Transform::from_translation(Vec3::ZERO),
                ));
            }
            Err(e) => {
                warn!("Could not read image dimensions from {:?}: {}", image_path, e);
            }
        }
    }
}

/// Recompute display metrics from the window size every frame (cheap), so
/// resizes immediately re-letterbox the image.
pub fn update_display_metrics(
    windows: Query<&Window, With<PrimaryWindow>>,
    natural: Res<NaturalDimensions>,
    mut metrics: ResMut<DisplayMetrics>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(natural) = natural.get() else {
        return;
    };

    let next = fit_metrics(natural, Vec2::new(window.width(), window.height()));
    if *metrics != next {
        debug!(
            "Display metrics updated: scale {:.4}, padding {:?}",
            next.scale, next.padding
        );
        *metrics = next;
    }
}

/// Keep the sprite sized to the scaled image. With contain-fit centering the
/// display rect's center coincides with the world origin, so the transform
/// stays at zero.
pub fn apply_display_metrics(
    natural: Res<NaturalDimensions>,
    metrics: Res<DisplayMetrics>,
    mut sprites: Query<&mut Sprite, With<ReviewImage>>,
) {
    if !metrics.is_changed() {
        return;
    }
    let Some(natural) = natural.get() else {
        return;
    };
    if !metrics.is_renderable() {
        return;
    }

    for mut sprite in sprites.iter_mut() {
        sprite.custom_size = Some(natural * metrics.scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_wide_image_letterboxes_vertically() {
        let metrics = fit_metrics(Vec2::new(2000.0, 1000.0), Vec2::new(1000.0, 1000.0));
        assert_eq!(metrics.scale, 0.5);
        assert_eq!(metrics.padding, Vec2::new(0.0, 250.0));
        assert!(metrics.is_renderable());
    }

    #[test]
    fn fit_tall_image_letterboxes_horizontally() {
        let metrics = fit_metrics(Vec2::new(500.0, 1000.0), Vec2::new(1000.0, 500.0));
        assert_eq!(metrics.scale, 0.5);
        assert_eq!(metrics.padding, Vec2::new(375.0, 0.0));
    }

    #[test]
    fn degenerate_dimensions_are_not_renderable() {
        assert!(!fit_metrics(Vec2::ZERO, Vec2::new(800.0, 600.0)).is_renderable());
        assert!(!fit_metrics(Vec2::new(800.0, 600.0), Vec2::ZERO).is_renderable());
        assert!(!DisplayMetrics::default().is_renderable());
    }

    #[test]
    fn natural_dimensions_filters_degenerate_values() {
        assert!(NaturalDimensions(Some(Vec2::new(0.0, 100.0))).get().is_none());
        assert!(NaturalDimensions(Some(Vec2::new(f32::NAN, 100.0)))
            .get()
            .is_none());
        assert_eq!(
            NaturalDimensions(Some(Vec2::new(640.0, 480.0))).get(),
            Some(Vec2::new(640.0, 480.0))
        );
    }

    #[test]
    fn display_to_world_flips_y_about_center() {
        let window = Vec2::new(800.0, 600.0);
        assert_eq!(display_to_world(Vec2::new(400.0, 300.0), window), Vec2::ZERO);
        assert_eq!(
            display_to_world(Vec2::new(0.0, 0.0), window),
            Vec2::new(-400.0, 300.0)
        );
        assert_eq!(
            display_to_world(Vec2::new(800.0, 600.0), window),
            Vec2::new(400.0, -300.0)
        );
    }
}
