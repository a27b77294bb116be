use bevy::prelude::*;

/// Lifecycle phase of a continuous gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// Pan gesture update. `translation` is the delta since the previous message.
#[derive(Message, Debug, Clone, Copy)]
pub struct PanGesture {
    pub phase: GesturePhase,
    pub translation: Vec2,
}

/// Rotation gesture update. `rotation` is the delta in radians since the previous message.
#[derive(Message, Debug, Clone, Copy)]
pub struct RotationGesture {
    pub phase: GesturePhase,
    pub rotation: f32,
}

/// The view's bounds changed; screen-space tracking is no longer valid
#[derive(Message, Debug, Clone, Copy)]
pub struct ViewResized {
    pub size: Vec2,
}
