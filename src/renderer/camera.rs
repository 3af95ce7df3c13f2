//! Top-down perspective camera.

use crate::math::{Mat4, Vec3, deg_to_rad};

/// Vertical field of view in degrees.
pub const FIELD_OF_VIEW: f32 = 75.0;
const Z_NEAR: f32 = 0.1;

/// Camera straight above the board centre, looking down, with world `-Z` as
/// screen-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopDownCamera {
    pub height: f32,
    pub aspect: f32,
    /// Board half-extent plus border that must stay visible. `None` keeps `height`.
    fit_extent: Option<f32>,
}

impl TopDownCamera {
    /// Camera at a fixed height.
    pub fn fixed(height: f32, aspect: f32) -> Self {
        Self {
            height,
            aspect,
            fit_extent: None,
        }
    }

    /// Camera that keeps a square of half-width `extent` around the origin in view
    /// for any aspect ratio.
    pub fn fitting(extent: f32, aspect: f32) -> Self {
        let mut camera = Self {
            height: 0.0,
            aspect,
            fit_extent: Some(extent),
        };
        camera.refit();
        camera
    }

    /// Updates the aspect ratio after a resize and refits if fitting.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
            self.refit();
        }
    }

    fn refit(&mut self) {
        if let Some(extent) = self.fit_extent {
            let tan = (deg_to_rad(FIELD_OF_VIEW) / 2.0).tan();
            let vertical = extent / tan;
            let horizontal = extent / (tan * self.aspect);
            self.height = vertical.max(horizontal);
        }
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(0.0, self.height, 0.0)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at(self.eye(), Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective(
            deg_to_rad(FIELD_OF_VIEW),
            self.aspect,
            Z_NEAR,
            self.height * 2.0 + 1.0,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection().multiply(&self.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ndc(camera: &TopDownCamera, point: Vec3) -> [f32; 3] {
        let [x, y, z, w] = camera.view_projection().transform_point(point);
        [x / w, y / w, z / w]
    }

    #[test]
    fn test_top_left_projects_to_upper_left() {
        let camera = TopDownCamera::fixed(10.0, 16.0 / 9.0);
        let [x, y, z] = ndc(&camera, Vec3::new(-3.0, 0.0, -3.0));
        assert!(x < 0.0 && y > 0.0);
        assert!((0.0..=1.0).contains(&z));

        let [x, y, _] = ndc(&camera, Vec3::new(3.0, 0.0, 3.0));
        assert!(x > 0.0 && y < 0.0);
    }

    #[test]
    fn test_centre_projects_to_screen_centre() {
        let camera = TopDownCamera::fixed(10.0, 1.0);
        let [x, y, _] = ndc(&camera, Vec3::ZERO);
        assert!(x.abs() < 1e-5 && y.abs() < 1e-5);
    }

    #[test]
    fn test_higher_points_are_closer() {
        let camera = TopDownCamera::fixed(10.0, 1.0);
        let ground = ndc(&camera, Vec3::ZERO)[2];
        let raised = ndc(&camera, Vec3::new(0.0, 0.2, 0.0))[2];
        assert!(raised < ground);
    }

    #[test]
    fn test_fitting_keeps_extent_on_screen() {
        for aspect in [0.5f32, 1.0, 16.0 / 9.0] {
            let camera = TopDownCamera::fitting(8.0, aspect);
            for corner in [
                Vec3::new(-8.0, 0.0, -8.0),
                Vec3::new(8.0, 0.0, 8.0),
                Vec3::new(8.0, 0.0, -8.0),
            ] {
                let [x, y, _] = ndc(&camera, corner);
                assert!(x.abs() <= 1.0 + 1e-4, "x = {x} at aspect {aspect}");
                assert!(y.abs() <= 1.0 + 1e-4, "y = {y} at aspect {aspect}");
            }
        }
    }

    #[test]
    fn test_narrow_window_raises_camera() {
        let mut camera = TopDownCamera::fitting(8.0, 2.0);
        let wide = camera.height;
        camera.set_aspect(0.5);
        assert!(camera.height > wide);

        let mut fixed = TopDownCamera::fixed(12.0, 2.0);
        fixed.set_aspect(0.5);
        assert_eq!(fixed.height, 12.0);
    }
}
