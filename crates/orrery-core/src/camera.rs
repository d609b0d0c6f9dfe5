// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Camera placement and projection settings.

use serde::{Deserialize, Serialize};

use crate::math::{Matrix4, MatrixResult, RotationInput, Vec3};

/// Defines the type of camera projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// Perspective projection with field of view.
    Perspective {
        /// The full vertical field of view in radians.
        fov_y_radians: f32,
    },
    /// Orthographic projection whose half-height is `size * tan(fov / 2)`.
    Orthographic {
        /// The vertical field of view in radians used to size the volume.
        fov_y_radians: f32,
        /// The size of the orthographic view volume.
        size: f32,
    },
}

/// A camera's placement in the world and its projection parameters.
///
/// The rig only stores numbers; [`CameraRig::view_matrix`] and
/// [`CameraRig::projection_matrix`] turn them into the matrices the renderer
/// uploads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    /// The type of projection (perspective or orthographic).
    pub projection: Projection,

    /// The aspect ratio of the viewport (width / height).
    /// This is typically updated when the window is resized.
    pub aspect_ratio: f32,

    /// The distance to the near clipping plane.
    pub z_near: f32,

    /// The distance to the far clipping plane.
    /// Should be larger than `z_near`.
    pub z_far: f32,

    /// The position of the camera in world space.
    pub eye: Vec3,

    /// The point the camera looks at.
    pub target: Vec3,

    /// The world's up direction, commonly `Vec3::Y`.
    pub up: Vec3,
}

impl CameraRig {
    /// Creates a new perspective camera at `(0, 0, 5)` looking at the origin.
    pub fn new_perspective(fov_y_radians: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            projection: Projection::Perspective { fov_y_radians },
            aspect_ratio,
            z_near,
            z_far,
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }

    /// Creates a new orthographic camera at `(0, 0, 5)` looking at the origin.
    pub fn new_orthographic(
        fov_y_radians: f32,
        size: f32,
        aspect_ratio: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        Self {
            projection: Projection::Orthographic {
                fov_y_radians,
                size,
            },
            ..Self::new_perspective(fov_y_radians, aspect_ratio, z_near, z_far)
        }
    }

    /// Creates a default perspective camera suitable for most 3D applications.
    ///
    /// - FOV: 60 degrees (~1.047 radians)
    /// - Aspect ratio: 16:9 (~1.777)
    /// - Near plane: 0.1
    /// - Far plane: 1000.0
    pub fn default_perspective() -> Self {
        Self::new_perspective(60.0_f32.to_radians(), 16.0 / 9.0, 0.1, 1000.0)
    }

    /// Moves the camera, returning the updated rig.
    pub fn looking_at(mut self, eye: Vec3, target: Vec3) -> Self {
        self.eye = eye;
        self.target = target;
        self
    }

    /// Calculates the projection matrix for this camera.
    pub fn projection_matrix(&self) -> Matrix4 {
        match self.projection {
            Projection::Perspective { fov_y_radians } => {
                Matrix4::perspective(fov_y_radians, self.z_near, self.z_far, self.aspect_ratio)
            }
            Projection::Orthographic {
                fov_y_radians,
                size,
            } => Matrix4::orthographic(
                fov_y_radians,
                size,
                self.z_near,
                self.z_far,
                self.aspect_ratio,
            ),
        }
    }

    /// Calculates the view matrix for this camera.
    pub fn view_matrix(&self) -> Matrix4 {
        Matrix4::view(self.eye, self.target, self.up)
    }

    /// Like [`CameraRig::view_matrix`], but fails instead of producing a
    /// collapsed basis when the placement is degenerate.
    pub fn try_view_matrix(&self) -> MatrixResult<Matrix4> {
        Matrix4::try_view(self.eye, self.target, self.up)
    }

    /// Updates the aspect ratio, typically called when the window is resized.
    pub fn set_aspect_ratio(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }

    /// Rotates the eye around the target by `yaw_radians` about the rig's up axis.
    pub fn orbit(&mut self, yaw_radians: f32) {
        let spin = Matrix4::from_transformation(
            Vec3::ZERO,
            RotationInput::from_axis_angle(self.up, yaw_radians),
            Vec3::ONE,
        );
        self.eye = self.target + spin.transform_vector(self.eye - self.target);
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::default_perspective()
    }
}
