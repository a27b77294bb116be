//! Renders placed objects, the feature cloud and the floor anchor.

use bevy::prelude::*;

use crate::config::EngineConfig;
use crate::objects::{ArObject, ObjectRegistry, ObjectSource, ShapeKind};
use crate::tracking::ArFrame;

const FEATURE_COLOR: Color = Color::srgb(1.0, 0.85, 0.2);
const FLOOR_COLOR: Color = Color::srgb(0.3, 0.7, 1.0);
const SELECTION_COLOR: Color = Color::srgb(0.2, 1.0, 0.4);
const MODEL_COLOR: Color = Color::srgb(0.6, 0.6, 0.65);

/// Mesh matching the object's bounds
fn object_mesh(object: &ArObject) -> Mesh {
    match &object.source {
        ObjectSource::Shape(shape) => match shape.kind {
            ShapeKind::Sphere { radius } => Sphere::new(radius).into(),
            _ => Cuboid::from_size(object.bounds.half_extents * 2.0).into(),
        },
        ObjectSource::Model { .. } => Cuboid::from_size(object.bounds.half_extents * 2.0).into(),
    }
}

fn object_color(object: &ArObject) -> Color {
    match &object.source {
        ObjectSource::Shape(shape) => {
            let [r, g, b, a] = shape.properties.color;
            Color::linear_rgba(r, g, b, a)
        }
        ObjectSource::Model { .. } => MODEL_COLOR,
    }
}

/// Gives newly attached objects something to draw
pub fn attach_object_meshes(
    mut commands: Commands,
    objects: Query<(Entity, &ArObject), Without<Mesh3d>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, object) in objects.iter() {
        if object.loading {
            continue;
        }
        commands.entity(entity).insert((
            Mesh3d(meshes.add(object_mesh(object))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: object_color(object),
                ..default()
            })),
        ));
    }
}

pub fn draw_selection(
    mut gizmos: Gizmos,
    registry: Res<ObjectRegistry>,
    objects: Query<&ArObject>,
) {
    let Some(object) = registry.selected().and_then(|e| objects.get(e).ok()) else {
        return;
    };
    let outline = object.transform().with_scale(object.bounds.half_extents * 2.1);
    gizmos.cube(outline, SELECTION_COLOR);
}

pub fn draw_tracking(mut gizmos: Gizmos, frame: Res<ArFrame>, config: Res<EngineConfig>) {
    for &point in &frame.feature_points {
        gizmos.cross(Isometry3d::from_translation(point), 0.01, FEATURE_COLOR);
    }

    let extent = config.data.simulator.ground_half_extent * 2.0;
    gizmos.rect(
        Isometry3d::new(
            Vec3::new(0.0, 0.0, -2.0),
            Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
        ),
        Vec2::splat(extent),
        FLOOR_COLOR,
    );
}
