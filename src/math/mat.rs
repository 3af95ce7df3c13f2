use crate::math::vec::Vec3;

/// Column-major 4x4 matrix, laid out the way WGSL reads a `mat4x4<f32>` uniform.
///
/// `self.0[column][row]`.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mat4(pub [[f32; 4]; 4]);

impl Mat4 {
    pub fn identity() -> Mat4 {
        Mat4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed perspective projection with a `[0, 1]` depth range.
    pub fn perspective(
        field_of_view_y_in_radians: f32,
        aspect: f32,
        z_near: f32,
        z_far: f32,
    ) -> Mat4 {
        let f = 1.0 / (field_of_view_y_in_radians * 0.5).tan();
        let range_reciprocal = 1.0 / (z_near - z_far);

        Mat4([
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, z_far * range_reciprocal, -1.0],
            [0.0, 0.0, z_far * z_near * range_reciprocal, 0.0],
        ])
    }

    /// Right-handed view matrix for a camera at `eye` looking at `target`.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let forward = (target - eye).normalize();
        let side = forward.cross(&up).normalize();
        let up = side.cross(&forward);

        Mat4([
            [side.x(), up.x(), -forward.x(), 0.0],
            [side.y(), up.y(), -forward.y(), 0.0],
            [side.z(), up.z(), -forward.z(), 0.0],
            [-side.dot(&eye), -up.dot(&eye), forward.dot(&eye), 1.0],
        ])
    }

    /// Matrix product `self * rhs` (apply `rhs` first).
    pub fn multiply(&self, rhs: &Mat4) -> Mat4 {
        let mut result = [[0.0; 4]; 4];
        for (column, out_column) in result.iter_mut().enumerate() {
            for (row, cell) in out_column.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.0[k][row] * rhs.0[column][k]).sum();
            }
        }
        Mat4(result)
    }

    /// Transforms a point and returns homogeneous clip coordinates `[x, y, z, w]`.
    pub fn transform_point(&self, point: Vec3) -> [f32; 4] {
        let p = [point.x(), point.y(), point.z(), 1.0];
        let mut out = [0.0; 4];
        for (row, value) in out.iter_mut().enumerate() {
            *value = (0..4).map(|column| self.0[column][row] * p[column]).sum();
        }
        out
    }
}

impl From<[[f32; 4]; 4]> for Mat4 {
    fn from(matrix: [[f32; 4]; 4]) -> Self {
        Mat4(matrix)
    }
}

impl From<Mat4> for [[f32; 4]; 4] {
    fn from(matrix: Mat4) -> Self {
        matrix.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translation(tx: f32, ty: f32, tz: f32) -> Mat4 {
        Mat4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [tx, ty, tz, 1.0],
        ])
    }

    #[test]
    fn test_translation_moves_points() {
        let m = translation(1.0, 2.0, 3.0);
        assert_eq!(m.transform_point(Vec3::ZERO), [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_multiply_applies_right_operand_first() {
        let t = translation(5.0, 0.0, 0.0);
        let scale = Mat4([
            [2.0, 0.0, 0.0, 0.0],
            [0.0, 2.0, 0.0, 0.0],
            [0.0, 0.0, 2.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        // scale first, then translate
        let p = t.multiply(&scale).transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(p, [7.0, 0.0, 0.0, 1.0]);
        assert_eq!(Mat4::identity().multiply(&t), t);
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let eye = Vec3::new(0.0, 10.0, 0.0);
        let view = Mat4::look_at(eye, Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let p = view.transform_point(eye);
        assert!(p[0].abs() < 1e-5 && p[1].abs() < 1e-5 && p[2].abs() < 1e-5);

        // The target lies straight ahead, down the camera's -Z axis.
        let target = view.transform_point(Vec3::ZERO);
        assert!((target[2] + 10.0).abs() < 1e-5);
    }
}
