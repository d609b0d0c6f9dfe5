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

//! The per-frame transform context.
//!
//! A frame rebuilds a handful of long-lived matrices in a fixed order: the
//! object's pivot, its incremental nudge, the model matrix, then the camera's
//! view and projection. [`FrameContext`] owns those matrices so no step can
//! reuse another step's result as scratch space, and hands back a
//! [`FrameMatrices`] snapshot for the renderer.

use serde::{Deserialize, Serialize};

use crate::camera::CameraRig;
use crate::math::{Matrix4, MatrixResult, RotationInput, Vec3};

/// An entity's position, rotation, and scale in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectTransform {
    /// The translation (position) of the object.
    pub translation: Vec3,
    /// The rotation of the object, as Euler angles or a quaternion.
    pub rotation: RotationInput,
    /// The scale of the object along its local axes.
    pub scale: Vec3,
}

impl ObjectTransform {
    /// Creates a new `ObjectTransform` with a given translation, rotation, and scale.
    pub fn new(translation: Vec3, rotation: RotationInput, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Creates a new identity `ObjectTransform` at the origin.
    pub fn identity() -> Self {
        Self::new(Vec3::ZERO, RotationInput::IDENTITY, Vec3::ONE)
    }

    /// Builds the model matrix for this transform.
    pub fn to_matrix(&self) -> Matrix4 {
        Matrix4::from_transformation(self.translation, self.rotation, self.scale)
    }
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Everything a frame needs to rebuild its matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// The object's transform for this frame.
    pub object: ObjectTransform,
    /// When set, the pivot is turned to face away from this point while
    /// keeping its scale.
    pub face_target: Option<Vec3>,
    /// The object's up reference when facing `face_target`. Independent of
    /// the camera's up vector.
    pub face_up: Vec3,
    /// A world-space shift applied to the pivot after orientation.
    pub nudge: Vec3,
    /// The camera for this frame.
    pub camera: CameraRig,
}

impl FrameInput {
    /// Creates an input with no facing target and no nudge. The facing up
    /// reference defaults to `+Y`.
    pub fn new(object: ObjectTransform, camera: CameraRig) -> Self {
        Self {
            object,
            face_target: None,
            face_up: Vec3::Y,
            nudge: Vec3::ZERO,
            camera,
        }
    }
}

/// The matrices produced by one frame, ready for upload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    /// Object space to world space.
    pub model: Matrix4,
    /// World space to camera space.
    pub view: Matrix4,
    /// Camera space to clip space.
    pub projection: Matrix4,
    /// `projection * view * model`.
    pub model_view_projection: Matrix4,
}

impl FrameMatrices {
    /// Computes the inverse-transpose of the model matrix, used to transform
    /// normals under non-uniform scale.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::math::MatrixError::Singular`] when the model
    /// matrix has a zero scale axis.
    pub fn normal_matrix(&self) -> MatrixResult<Matrix4> {
        Ok(self.model.inverse()?.transpose())
    }
}

/// Owns the long-lived matrices of the frame pipeline.
#[derive(Debug, Clone, Default)]
pub struct FrameContext {
    pivot: Matrix4,
    model: Matrix4,
    view: Matrix4,
    projection: Matrix4,
    frame_index: u64,
}

impl FrameContext {
    /// Creates a context with every matrix at the identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames processed so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// The pivot as of the last update.
    pub fn pivot(&self) -> &Matrix4 {
        &self.pivot
    }

    /// Runs one frame of the pipeline.
    pub fn update(&mut self, input: &FrameInput) -> FrameMatrices {
        let object = &input.object;

        self.pivot
            .set_transformation(object.translation, object.rotation, object.scale);
        if let Some(target) = input.face_target {
            self.pivot
                .look_at_from(object.translation, target, input.face_up, None);
        }
        self.pivot.offset(input.nudge);
        self.model.copy_from(&self.pivot);

        let camera = &input.camera;
        self.view.set_view(camera.eye, camera.target, camera.up);
        self.projection = camera.projection_matrix();

        let model_view_projection = self
            .projection
            .multiplied(&self.view)
            .multiplied(&self.model);

        self.frame_index += 1;
        log::debug!(
            "Frame {} composed; model translation {:?}",
            self.frame_index,
            self.model.translation()
        );

        FrameMatrices {
            model: self.model,
            view: self.view,
            projection: self.projection,
            model_view_projection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{MatrixError, FRAC_PI_2};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_identity_object_with_default_camera() {
        let mut ctx = FrameContext::new();
        let input = FrameInput::new(ObjectTransform::identity(), CameraRig::default());
        let out = ctx.update(&input);

        assert_eq!(out.model, Matrix4::IDENTITY);
        assert_abs_diff_eq!(out.view, CameraRig::default().view_matrix());
        assert_abs_diff_eq!(out.projection, CameraRig::default().projection_matrix());
        assert_eq!(ctx.frame_index(), 1);
    }

    #[test]
    fn test_mvp_is_projection_view_model() {
        let mut ctx = FrameContext::new();
        let object = ObjectTransform::new(
            Vec3::new(1.0, -2.0, 0.5),
            RotationInput::euler(0.2, 0.4, 0.6),
            Vec3::new(1.0, 2.0, 3.0),
        );
        let out = ctx.update(&FrameInput::new(object, CameraRig::default()));

        let expected = out.projection * out.view * out.model;
        assert_abs_diff_eq!(out.model_view_projection, expected);
        assert_abs_diff_eq!(out.model, object.to_matrix());
    }

    #[test]
    fn test_nudge_is_not_accumulated_across_frames() {
        let mut ctx = FrameContext::new();
        let mut input = FrameInput::new(ObjectTransform::identity(), CameraRig::default());
        input.nudge = Vec3::new(0.0, 1.0, 0.0);

        let first = ctx.update(&input);
        let second = ctx.update(&input);
        assert_eq!(first.model.translation(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(second.model, first.model);
        assert_eq!(ctx.frame_index(), 2);
    }

    #[test]
    fn test_face_target_keeps_scale() {
        let mut ctx = FrameContext::new();
        let object = ObjectTransform::new(
            Vec3::new(0.0, 0.0, 3.0),
            RotationInput::euler(0.0, FRAC_PI_2, 0.0),
            Vec3::new(2.0, 2.0, 2.0),
        );
        let mut input = FrameInput::new(object, CameraRig::default());
        input.face_target = Some(Vec3::ZERO);

        let out = ctx.update(&input);
        assert_abs_diff_eq!(out.model.scale(), Vec3::new(2.0, 2.0, 2.0));
        // First axis points away from the target.
        assert_abs_diff_eq!(
            out.model.transform_vector(Vec3::X),
            Vec3::new(0.0, 0.0, 2.0)
        );
        assert_eq!(ctx.pivot(), &out.model);
    }

    #[test]
    fn test_face_up_is_independent_of_camera_up() {
        let mut ctx = FrameContext::new();
        let object = ObjectTransform::new(Vec3::new(0.0, 0.0, 3.0), RotationInput::IDENTITY, Vec3::ONE);
        let mut camera = CameraRig::default();
        camera.up = Vec3::X;
        let mut input = FrameInput::new(object, camera);
        input.face_target = Some(Vec3::ZERO);

        // forward = +Z, side = Y x Z = +X
        let out = ctx.update(&input);
        assert_abs_diff_eq!(out.model.transform_vector(Vec3::Y), Vec3::X);
        assert_abs_diff_eq!(out.model.transform_vector(Vec3::Z), Vec3::Y);

        input.face_up = Vec3::new(0.0, -1.0, 0.0);
        let flipped = ctx.update(&input);
        assert_abs_diff_eq!(flipped.model.transform_vector(Vec3::Y), -Vec3::X);
        assert_eq!(flipped.view, out.view);
    }

    #[test]
    fn test_normal_matrix() {
        let mut ctx = FrameContext::new();
        let object = ObjectTransform::new(Vec3::ONE, RotationInput::IDENTITY, Vec3::new(2.0, 1.0, 1.0));
        let out = ctx.update(&FrameInput::new(object, CameraRig::default()));

        let normal = out.normal_matrix().expect("model is invertible");
        assert_abs_diff_eq!(normal.transform_vector(Vec3::X), Vec3::new(0.5, 0.0, 0.0));

        let flat = ObjectTransform::new(Vec3::ZERO, RotationInput::IDENTITY, Vec3::new(1.0, 0.0, 1.0));
        let out = ctx.update(&FrameInput::new(flat, CameraRig::default()));
        assert_eq!(out.normal_matrix(), Err(MatrixError::Singular));
    }
}
