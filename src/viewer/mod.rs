//! Image viewer: camera, the reviewed image sprite and its display metrics.
//!
//! This module is the layout collaborator of the region editor: it decides
//! how the image's natural pixel grid maps onto the window (scale plus
//! letterbox padding) and publishes that mapping as [`DisplayMetrics`].
//! The editor consumes the metrics read-only.

mod camera;
mod image;

pub use image::{
    display_to_world, fit_metrics, DisplayMetrics, NaturalDimensions, ReviewImage,
};

use bevy::prelude::*;

pub struct ViewerPlugin;

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NaturalDimensions>()
            .init_resource::<DisplayMetrics>()
            .add_systems(Startup, camera::spawn_camera)
            .add_systems(
                Update,
                (
                    image::sync_review_image,
                    image::update_display_metrics,
                    image::apply_display_metrics,
                )
                    .chain(),
            );
    }
}
