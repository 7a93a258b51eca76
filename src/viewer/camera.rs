use bevy::camera::visibility::RenderLayers;
use bevy::prelude::*;

#[derive(Component)]
pub struct ReviewCamera;

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        ReviewCamera,
        Transform::from_translation(Vec3::new(0.0, 0.0, 1000.0)),
        // Layer 0 = image, Layer 1 = overlay gizmos
        RenderLayers::from_layers(&[0, 1]),
    ));
}
