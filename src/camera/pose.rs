use serde::{Deserialize, Serialize};

use crate::animation::lerp::Lerp;
use crate::foundation::core::Vec3;
use crate::params::snapshot::FieldParams;

/// Stock camera position, looking at the grid center.
pub const DEFAULT_CAMERA_POSITION: Vec3 = Vec3::new(15.0, 20.0, 40.0);

/// Owned camera placement: an eye point looking at a target.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Eye position.
    pub position: Vec3,
    /// Look-at point.
    pub target: Vec3,
}

impl CameraPose {
    /// Pose from its two points.
    pub const fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Stock pose looking at `center`.
    pub const fn looking_at(center: Vec3) -> Self {
        Self::new(DEFAULT_CAMERA_POSITION, center)
    }

    /// Unit vector from position to target; `None` when they coincide.
    pub fn view_direction(&self) -> Option<Vec3> {
        (self.target - self.position).normalized()
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::looking_at(FieldParams::default().grid_center())
    }
}

impl Lerp for CameraPose {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            position: Vec3::lerp(&a.position, &b.position, t),
            target: Vec3::lerp(&a.target, &b.target, t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/pose.rs"]
mod tests;
