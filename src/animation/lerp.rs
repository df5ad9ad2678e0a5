use crate::foundation::core::Vec3;
use crate::foundation::math::{lerp, round_half_up};

/// Interpolation contract for animatable value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        lerp(*a, *b, t)
    }
}

/// Integer fields blend linearly and then snap to the nearest integer.
impl Lerp for i32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        round_half_up(lerp(f64::from(*a), f64::from(*b), t)) as i32
    }
}

impl Lerp for Vec3 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec3::new(
            lerp(a.x, b.x, t),
            lerp(a.y, b.y, t),
            lerp(a.z, b.z, t),
        )
    }
}

/// How discrete flags are carried across an interpolated span.
///
/// Flags are never partially blended; the policy only decides where the switch happens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlagBlend {
    /// Previous value while the eased fraction is below 0.5, next value from there on.
    #[default]
    Midpoint,
    /// Previous value for the whole span; the next value only applies at the next keyframe.
    HoldPrevious,
}

impl FlagBlend {
    /// Pick between `a` (previous) and `b` (next) at eased fraction `t`.
    pub fn pick<T: Copy>(self, a: T, b: T, t: f64) -> T {
        match self {
            Self::Midpoint => {
                if t < 0.5 {
                    a
                } else {
                    b
                }
            }
            Self::HoldPrevious => {
                if t < 1.0 {
                    a
                } else {
                    b
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/lerp.rs"]
mod tests;
