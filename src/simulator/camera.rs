use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

/// The camera standing in for the tracked device
#[derive(Component)]
pub struct SimulatorCamera;

/// Accumulated look angles (radians)
#[derive(Component, Default)]
pub struct CameraLook {
    pub yaw: f32,
    pub pitch: f32,
}

const LOOK_SENSITIVITY: f32 = 0.004;
const MOVE_SPEED: f32 = 1.5;
const MAX_PITCH: f32 = 1.5;

pub fn spawn_camera(mut commands: Commands) {
    let look = CameraLook {
        yaw: 0.0,
        pitch: -0.5,
    };
    commands.spawn((
        Camera3d::default(),
        SimulatorCamera,
        Transform::from_translation(Vec3::new(0.0, 1.4, 0.5)).with_rotation(look_rotation(&look)),
        look,
    ));
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(2.0, 4.0, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn look_rotation(look: &CameraLook) -> Quat {
    Quat::from_euler(EulerRot::YXZ, look.yaw, look.pitch, 0.0)
}

/// Right mouse drag turns the device
pub fn camera_look(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut camera_query: Query<(&mut Transform, &mut CameraLook), With<SimulatorCamera>>,
) {
    if !mouse_button.pressed(MouseButton::Right) {
        mouse_motion.clear();
        return;
    }

    let Ok((mut transform, mut look)) = camera_query.single_mut() else {
        return;
    };

    for event in mouse_motion.read() {
        look.yaw -= event.delta.x * LOOK_SENSITIVITY;
        look.pitch = (look.pitch - event.delta.y * LOOK_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);
    }
    transform.rotation = look_rotation(&look);
}

/// WASD walks on the horizontal plane, scroll moves along the view direction
pub fn camera_move(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut scroll_events: MessageReader<MouseWheel>,
    mut camera_query: Query<&mut Transform, With<SimulatorCamera>>,
) {
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };

    let forward = transform.forward().with_y(0.0).normalize_or_zero();
    let right = transform.right().with_y(0.0).normalize_or_zero();
    let mut direction = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        direction += forward;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        direction -= forward;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        direction += right;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        direction -= right;
    }
    transform.translation += direction.normalize_or_zero() * MOVE_SPEED * time.delta_secs();

    for event in scroll_events.read() {
        let amount = match event.unit {
            MouseScrollUnit::Line => event.y * 0.1,
            MouseScrollUnit::Pixel => event.y * 0.001,
        };
        let step = transform.forward() * amount;
        transform.translation += step;
    }
}
