use crate::foundation::core::Vec3;

/// Radians added per tick by auto-rotation.
pub const AUTO_ROTATE_SPEED: f64 = 0.005;

/// Placement of the whole grid group in the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GridTransform {
    /// Group translation, the grid center.
    pub translation: Vec3,
    /// Accumulated rotation about X, in radians.
    pub rotation_x: f64,
    /// Accumulated rotation about Y, in radians.
    pub rotation_y: f64,
}

impl GridTransform {
    /// Identity rotation at `translation`.
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    /// Advance auto-rotation by one tick on the enabled axes.
    pub fn auto_rotate(&mut self, x: bool, y: bool, speed: f64) {
        if x {
            self.rotation_x += speed;
        }
        if y {
            self.rotation_y += speed;
        }
    }

    /// Zero both rotations.
    pub fn reset_rotation(&mut self) {
        self.rotation_x = 0.0;
        self.rotation_y = 0.0;
    }

    /// Map a point from grid space to world space.
    ///
    /// Rotation follows XYZ Euler order, so the Y rotation acts on the point first.
    pub fn apply(&self, p: Vec3) -> Vec3 {
        let (sx, cx) = self.rotation_x.sin_cos();
        let (sy, cy) = self.rotation_y.sin_cos();
        let x1 = p.x * cy + p.z * sy;
        let z1 = -p.x * sy + p.z * cy;
        let y2 = p.y * cx - z1 * sx;
        let z2 = p.y * sx + z1 * cx;
        Vec3::new(x1, y2, z2) + self.translation
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/grid.rs"]
mod tests;
