//! Camera placement and projection parameters.

use cgmath::{Deg, Matrix4, Rad, Vector3};

use crate::{error::Result, transform};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new<F: Into<Rad<f32>>>(
        eye: Vector3<f32>,
        target: Vector3<f32>,
        fovy: F,
        znear: f32,
        zfar: f32,
    ) -> Self {
        Self {
            eye,
            target,
            up: Vector3::unit_y(),
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// Camera-to-world placement.
    pub fn camera_matrix(&self) -> Result<Matrix4<f32>> {
        transform::look_at(self.eye, self.target, self.up)
    }

    /// World-to-camera.
    pub fn view(&self) -> Result<Matrix4<f32>> {
        transform::inverse(&self.camera_matrix()?)
    }

    pub fn projection(&self, aspect: f32) -> Matrix4<f32> {
        transform::perspective(self.fovy.0, aspect, self.znear, self.zfar)
    }

    pub fn view_projection(&self, aspect: f32) -> Result<Matrix4<f32>> {
        Ok(transform::multiply(&self.projection(aspect), &self.view()?))
    }
}

impl Default for Camera {
    /// Four units out on +Z looking at the planet centre.
    fn default() -> Self {
        Self::new(
            Vector3::new(0.0, 0.0, 4.0),
            Vector3::new(0.0, 0.0, 0.0),
            Deg(60.0),
            0.1,
            50.0,
        )
    }
}
