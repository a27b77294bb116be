//! Simulated tracking: camera pose, feature cloud and a ground plane anchor.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{EngineConfig, SimulatorSettings};
use crate::geometry::{CameraPose, Ray};
use crate::tracking::{AnchorId, ArFrame, PlaneHit, PlaneHitTest};

use super::camera::SimulatorCamera;

/// Anchor handle reported for the simulated floor
pub const GROUND_ANCHOR: AnchorId = AnchorId(1);

/// Synthetic feature points, regenerated when the simulator settings change
#[derive(Resource, Debug, Default)]
pub struct SyntheticFeatures {
    pub points: Vec<Vec3>,
    seed: Option<u64>,
    count: usize,
}

impl SyntheticFeatures {
    fn is_stale(&self, settings: &SimulatorSettings) -> bool {
        self.seed != Some(settings.seed) || self.count != settings.feature_point_count
    }
}

/// Scatter points over the floor and a few box-shaped props
pub fn generate_feature_cloud(settings: &SimulatorSettings) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(settings.seed);
    let spread = settings.ground_half_extent.abs() * 2.0;
    let props = [
        (Vec3::new(-1.2, 0.4, -2.5), Vec3::new(0.3, 0.4, 0.3)),
        (Vec3::new(1.0, 0.25, -1.8), Vec3::new(0.5, 0.25, 0.3)),
        (Vec3::new(0.0, 0.75, -3.5), Vec3::new(1.0, 0.75, 0.1)),
    ];

    (0..settings.feature_point_count)
        .map(|i| {
            if i % 3 == 0 {
                let (center, half) = props[rng.gen_range(0..props.len())];
                center
                    + Vec3::new(
                        rng.gen_range(-half.x..=half.x),
                        rng.gen_range(-half.y..=half.y),
                        rng.gen_range(-half.z..=half.z),
                    )
            } else {
                Vec3::new(
                    rng.gen_range(-spread..=spread),
                    rng.gen_range(-0.01..=0.01),
                    rng.gen_range(-spread * 2.0..=0.0),
                )
            }
        })
        .collect()
}

/// Bounded floor at `y = 0`, centered in front of the start position
pub struct GroundPlane {
    pub camera: CameraPose,
    pub center: Vec3,
    pub half_extent: f32,
}

impl PlaneHitTest for GroundPlane {
    fn hit_test(&self, screen: Vec2) -> Option<PlaneHit> {
        let ray = Ray::from_screen(&self.camera, screen)?;
        let position = ray.intersect_horizontal_plane(self.center.y)?;
        let offset = (position - self.center).abs();
        (offset.x <= self.half_extent && offset.z <= self.half_extent).then_some(PlaneHit {
            position,
            anchor: GROUND_ANCHOR,
        })
    }
}

/// Camera pose as the tracking subsystem would report it
pub fn camera_pose(camera: &Camera, transform: &GlobalTransform, viewport: Vec2) -> CameraPose {
    CameraPose::new(
        Mat4::from(transform.affine()),
        camera.clip_from_view(),
        viewport,
    )
}

pub fn regenerate_features(config: Res<EngineConfig>, mut features: ResMut<SyntheticFeatures>) {
    let settings = &config.data.simulator;
    if !features.is_stale(settings) {
        return;
    }
    features.points = generate_feature_cloud(settings);
    features.seed = Some(settings.seed);
    features.count = settings.feature_point_count;
    info!(
        "Generated {} synthetic feature points (seed {})",
        features.points.len(),
        settings.seed
    );
}

/// Publishes this frame's tracking snapshot
pub fn update_ar_frame(
    mut frame: ResMut<ArFrame>,
    config: Res<EngineConfig>,
    features: Res<SyntheticFeatures>,
    camera: Query<(&Camera, &GlobalTransform), With<SimulatorCamera>>,
    window: Query<&Window, With<PrimaryWindow>>,
) {
    let pose = match (camera.single(), window.single()) {
        (Ok((camera, transform)), Ok(window)) => {
            Some(camera_pose(camera, transform, window.size()))
        }
        _ => None,
    };

    frame.camera = pose;
    frame.feature_points.clone_from(&features.points);
    frame.planes = match pose {
        Some(camera) => Box::new(GroundPlane {
            camera,
            center: Vec3::new(0.0, 0.0, -2.0),
            half_extent: config.data.simulator.ground_half_extent,
        }),
        None => Box::new(crate::tracking::NoPlanes),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_is_deterministic_per_seed() {
        let settings = SimulatorSettings::default();
        assert_eq!(generate_feature_cloud(&settings), generate_feature_cloud(&settings));

        let other = SimulatorSettings {
            seed: settings.seed + 1,
            ..settings.clone()
        };
        assert_ne!(generate_feature_cloud(&settings), generate_feature_cloud(&other));
    }

    #[test]
    fn test_cloud_size_follows_settings() {
        let settings = SimulatorSettings {
            feature_point_count: 25,
            ..default()
        };
        assert_eq!(generate_feature_cloud(&settings).len(), 25);
    }

    #[test]
    fn test_ground_plane_is_bounded() {
        let pose = Mat4::from_translation(Vec3::new(0.0, 1.5, 0.0))
            * Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_4);
        let camera = CameraPose::perspective(pose, 1.0, Vec2::new(800.0, 600.0), 0.1, 100.0);
        let plane = GroundPlane {
            camera,
            center: Vec3::new(0.0, 0.0, -2.0),
            half_extent: 1.0,
        };

        let hit = plane.hit_test(Vec2::new(400.0, 300.0)).unwrap();
        assert_eq!(hit.anchor, GROUND_ANCHOR);
        assert!((hit.position - Vec3::new(0.0, 0.0, -1.5)).length() < 1e-3);

        // Top of the screen looks past the far edge of the floor
        assert!(plane.hit_test(Vec2::new(400.0, 0.0)).is_none());
    }
}
