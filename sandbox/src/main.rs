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

//! Drives a spinning object through the frame pipeline and logs the matrices.
//!
//! Usage: `orrery-sandbox [scene.json]`. Without an argument the default scene
//! is used.

use anyhow::{Context, Result};
use orrery_core::{FrameContext, FrameInput, ObjectTransform, RotationInput, SceneConfig, Vec3};

fn load_scene() -> Result<SceneConfig> {
    match std::env::args().nth(1) {
        Some(path) => SceneConfig::from_file(&path)
            .with_context(|| format!("could not load scene from '{path}'")),
        None => {
            log::info!("No scene file given, using the default scene");
            Ok(SceneConfig::default())
        }
    }
}

/// Applies a world-space yaw about `+Y` on top of `base`.
///
/// Euler input gets the yaw added to its Y angle. Quaternion input is
/// pre-multiplied by the yaw quaternion, so the configured orientation is
/// kept and the spin happens around the world up axis.
fn spun(base: RotationInput, yaw: f32) -> RotationInput {
    match base {
        RotationInput::Euler(angles) => {
            RotationInput::Euler(Vec3::new(angles.x, angles.y + yaw, angles.z))
        }
        RotationInput::Quaternion { x, y, z, w } => {
            let (s, c) = (yaw * 0.5).sin_cos();
            // Hamilton product (0, s, 0, c) * (x, y, z, w).
            RotationInput::quaternion(
                c * x + s * z,
                c * y + s * w,
                c * z - s * x,
                c * w - s * y,
            )
        }
    }
}

/// The object as it should be drawn on `frame`.
fn object_at(scene: &SceneConfig, frame: u32) -> ObjectTransform {
    let yaw = scene.spin_radians_per_frame * frame as f32;
    ObjectTransform {
        rotation: spun(scene.object.rotation, yaw),
        ..scene.object
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let scene = load_scene()?;
    let mut ctx = FrameContext::new();

    for frame in 0..scene.frames {
        let object = object_at(&scene, frame);
        let out = ctx.update(&FrameInput::new(object, scene.camera));
        log::info!(
            "Frame {} (spin {:.1} deg), model determinant {:.4}",
            ctx.frame_index(),
            (scene.spin_radians_per_frame * frame as f32).to_degrees(),
            out.model.determinant()
        );
        log::info!("Model:\n{}", out.model);
        log::debug!("View:\n{}", out.view);
        log::debug!("Projection:\n{}", out.projection);
        log::info!("Model-view-projection:\n{}", out.model_view_projection);

        match out.normal_matrix() {
            Ok(normal) => log::trace!("Normal matrix:\n{normal}"),
            Err(e) => log::warn!("No normal matrix this frame: {e}"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use orrery_core::Matrix4;
    use std::f32::consts::FRAC_PI_2;

    fn quarter_turn_about_z() -> RotationInput {
        let half = FRAC_PI_2 * 0.5;
        RotationInput::quaternion(0.0, 0.0, half.sin(), half.cos())
    }

    fn rotation_matrix(rotation: RotationInput) -> Matrix4 {
        Matrix4::from_transformation(Vec3::ZERO, rotation, Vec3::ONE)
    }

    #[test]
    fn test_quaternion_scene_keeps_orientation_on_first_frame() {
        let scene = SceneConfig::from_json(
            r#"{
                "object": {
                    "translation": { "x": 0.0, "y": 0.0, "z": 0.0 },
                    "rotation": { "quaternion": { "x": 0.0, "y": 0.0, "z": 0.70710677, "w": 0.70710677 } },
                    "scale": { "x": 1.0, "y": 1.0, "z": 1.0 }
                }
            }"#,
        )
        .unwrap();

        let object = object_at(&scene, 0);
        assert_eq!(object.rotation, scene.object.rotation);

        let mut ctx = FrameContext::new();
        let out = ctx.update(&FrameInput::new(object, scene.camera));
        assert_abs_diff_eq!(out.model.transform_vector(Vec3::X), Vec3::Y, epsilon = 1e-6);
        assert_ne!(out.model, Matrix4::IDENTITY);
    }

    #[test]
    fn test_quaternion_spin_is_applied_after_orientation() {
        let base = quarter_turn_about_z();
        let yaw = 0.6;

        let expected = Matrix4::from_rotation(Vec3::new(0.0, yaw, 0.0)) * rotation_matrix(base);
        assert_abs_diff_eq!(rotation_matrix(spun(base, yaw)), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_euler_spin_adds_to_yaw() {
        let base = RotationInput::euler(0.1, 0.2, 0.3);
        assert_eq!(spun(base, 0.5), RotationInput::euler(0.1, 0.2 + 0.5, 0.3));
    }

    #[test]
    fn test_default_scene_spins_each_frame() {
        let scene = SceneConfig::default();
        let third = object_at(&scene, 3);
        assert_abs_diff_eq!(
            rotation_matrix(third.rotation),
            Matrix4::from_rotation(Vec3::new(0.0, 3.0 * scene.spin_radians_per_frame, 0.0)),
            epsilon = 1e-6
        );
        assert_eq!(third.translation, scene.object.translation);
    }
}
