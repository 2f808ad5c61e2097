/// Camera - view/frustum provider consumed by every draw-type job.
///
/// The Camera computes nothing. The caller (culling/scene system) computes
/// the view and projection matrices and stores them here each frame.

use glam::Mat4;

/// View/frustum provider
///
/// Exposes the matrices a draw job loads into its batch before drawing.
pub trait ViewFrustum: Send + Sync {
    /// Projection matrix (perspective or orthographic)
    fn eval_projection_matrix(&self) -> Mat4;

    /// View transform (inverse of the eye's world transform)
    fn eval_view_transform(&self) -> Mat4;
}

/// Low-level camera. A passive data container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
}

impl Camera {
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self {
            view_matrix: view,
            projection_matrix: projection,
        }
    }

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (perspective or orthographic).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
    }

    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

impl ViewFrustum for Camera {
    fn eval_projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    fn eval_view_transform(&self) -> Mat4 {
        self.view_matrix
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
