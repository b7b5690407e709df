/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Terminal cells are roughly twice as tall as they are wide
pub const TERMINAL_CELL_ASPECT: f32 = 0.5;

/// Camera looking at the cube from the +Z side
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    /// Square pixels
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_cell_aspect(width, height, 1.0)
    }

    /// `cell_aspect` is the width of one output cell divided by its height
    pub fn with_cell_aspect(width: u32, height: u32, cell_aspect: f32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 8.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 * cell_aspect / height.max(1) as f32,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = (self.position - self.target).norm() * (self.fov / 2.0).tan() * 2.0;
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Project a model-space point to screen space.
    ///
    /// Returns `(x, y, depth)` with depth in normalised device units (smaller
    /// is nearer), or `None` when the point falls outside the view volume.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.projection_matrix() * self.view_matrix() * model_matrix;

        // Homogeneous clip coordinates; w carries the perspective divide
        let clip = mvp * point.to_homogeneous();
        if clip.w.abs() < 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        // Clip test
        if !(-1.0..=1.0).contains(&ndc_x)
            || !(-1.0..=1.0).contains(&ndc_y)
            || !(-1.0..=1.0).contains(&depth)
        {
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }

    /// Direction from the target towards the camera
    pub fn view_direction(&self) -> Vector3<f32> {
        (self.position - self.target).normalize()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);

        let terminal = Camera::with_cell_aspect(80, 20, TERMINAL_CELL_ASPECT);
        assert!((terminal.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_origin_projects_to_centre() {
        let camera = Camera::new(800, 600);
        let (x, y, depth) = camera
            .project_to_screen(&Point3::origin(), &Matrix4::identity(), 800, 600)
            .expect("origin is visible");
        assert!((x - 400.0).abs() < 1e-3);
        assert!((y - 300.0).abs() < 1e-3);
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn test_nearer_points_have_smaller_depth() {
        let camera = Camera::default();
        let model = Matrix4::identity();
        let (_, _, near) = camera
            .project_to_screen(&Point3::new(0.0, 0.0, 1.0), &model, 800, 600)
            .expect("visible");
        let (_, _, far) = camera
            .project_to_screen(&Point3::new(0.0, 0.0, -1.0), &model, 800, 600)
            .expect("visible");
        assert!(near < far);
    }

    #[test]
    fn test_points_behind_camera_are_clipped() {
        let camera = Camera::default();
        let behind = Point3::new(0.0, 0.0, 20.0);
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), 800, 600)
            .is_none());
    }

    #[test]
    fn test_orthographic_keeps_cube_in_view() {
        let mut camera = Camera::default();
        camera.mode = ProjectionMode::Orthographic;
        let corner = Point3::new(1.5, 1.5, 1.5);
        assert!(camera
            .project_to_screen(&corner, &Matrix4::identity(), 800, 600)
            .is_some());
    }
}
