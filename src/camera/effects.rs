use crate::camera::pose::CameraPose;
use crate::foundation::core::Vec3;
use crate::foundation::math::unit_jitter;
use crate::params::snapshot::FieldParams;

/// Radians of roll per unit of `camRoll`.
pub const ROLL_SCALE: f64 = 0.01;
/// Peak-to-peak shake distance per unit of `camShake`.
pub const SHAKE_SCALE: f64 = 0.1;
/// Distance along the view direction per unit of `camDolly`.
pub const DOLLY_SCALE: f64 = 0.5;

/// Transient render-time camera adjustments.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraEffects {
    /// Roll amount (`camRoll`).
    pub roll: f64,
    /// Shake amount (`camShake`).
    pub shake: f64,
    /// Dolly amount (`camDolly`).
    pub dolly: f64,
}

impl CameraEffects {
    /// Effects configured in `params`.
    pub fn from_params(params: &FieldParams) -> Self {
        Self {
            roll: params.cam_roll,
            shake: params.cam_shake,
            dolly: params.cam_dolly,
        }
    }

    /// Return `true` when no effect is active.
    pub fn is_identity(&self) -> bool {
        self.roll == 0.0 && self.shake == 0.0 && self.dolly == 0.0
    }
}

/// Camera actually used to draw one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectiveCamera {
    /// Eye position.
    pub position: Vec3,
    /// Look-at point.
    pub target: Vec3,
    /// Rotation about the view axis, in radians.
    pub roll: f64,
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
}

impl EffectiveCamera {
    /// Apply `effects` to `pose` without touching it.
    ///
    /// Shake and dolly translate eye and target together, so the view direction is kept.
    /// Shake offsets are drawn from `(seed, tick)` and are reproducible.
    pub fn derive(
        pose: &CameraPose,
        effects: &CameraEffects,
        fov_degrees: f64,
        seed: u64,
        tick: u64,
    ) -> Self {
        let mut offset = Vec3::ZERO;
        if effects.shake != 0.0 {
            let amount = effects.shake * SHAKE_SCALE;
            let axis = |lane: u8| (unit_jitter(seed, tick, lane) - 0.5) * amount;
            offset = Vec3::new(axis(0), axis(1), axis(2));
        }
        if effects.dolly != 0.0
            && let Some(dir) = pose.view_direction()
        {
            offset = offset + dir * (effects.dolly * DOLLY_SCALE);
        }
        Self {
            position: pose.position + offset,
            target: pose.target + offset,
            roll: effects.roll * ROLL_SCALE,
            fov_degrees,
        }
    }

    /// Camera pose without the roll component.
    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position, self.target)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/effects.rs"]
mod tests;
