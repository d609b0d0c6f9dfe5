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

//! Integration tests driving the frame pipeline the way a render loop does.

use approx::assert_abs_diff_eq;
use orrery_core::{
    CameraRig, FrameContext, FrameInput, Matrix4, ObjectTransform, RotationInput, SceneConfig,
    Vec3,
};

#[test]
fn spinning_object_returns_to_start_after_full_turn() {
    let mut ctx = FrameContext::new();
    let steps = 8;
    let step = std::f32::consts::TAU / steps as f32;
    let camera = CameraRig::default();

    let start = ObjectTransform::new(
        Vec3::new(1.0, 0.0, 0.0),
        RotationInput::IDENTITY,
        Vec3::ONE,
    );
    let first = ctx.update(&FrameInput::new(start, camera));

    let mut last = first;
    for i in 1..=steps {
        let object = ObjectTransform {
            rotation: RotationInput::euler(0.0, step * i as f32, 0.0),
            ..start
        };
        last = ctx.update(&FrameInput::new(object, camera));
    }

    assert_abs_diff_eq!(last.model, first.model, epsilon = 1e-5);
    assert_eq!(ctx.frame_index(), steps as u64 + 1);
}

#[test]
fn object_in_front_of_camera_lands_inside_clip_volume() {
    let mut ctx = FrameContext::new();
    let out = ctx.update(&FrameInput::new(
        ObjectTransform::identity(),
        CameraRig::default(),
    ));

    // Origin is 5 units in front of the default camera.
    let view_space = out.view.transform_point(Vec3::ZERO);
    assert_abs_diff_eq!(view_space, Vec3::new(0.0, 0.0, -5.0), epsilon = 1e-5);

    let clip = out.model_view_projection;
    let w = clip[3][3];
    let ndc_z = clip[2][3] / w;
    assert!(w > 0.0);
    assert!((-1.0..=1.0).contains(&ndc_z));
}

#[test]
fn each_frame_reflects_only_its_own_input() {
    let mut ctx = FrameContext::new();
    let camera = CameraRig::default();

    let moved = ObjectTransform::new(Vec3::new(0.0, 3.0, 0.0), RotationInput::IDENTITY, Vec3::ONE);
    let mut nudged = FrameInput::new(moved, camera);
    nudged.nudge = Vec3::new(1.0, 0.0, 0.0);
    ctx.update(&nudged);

    let plain = ctx.update(&FrameInput::new(ObjectTransform::identity(), camera));
    assert_eq!(plain.model, Matrix4::IDENTITY);
}

#[test]
fn default_scene_config_drives_frames() {
    let config = SceneConfig::default();
    let mut ctx = FrameContext::new();
    let mut object = config.object;

    for frame in 0..config.frames {
        object.rotation = RotationInput::euler(0.0, config.spin_radians_per_frame * frame as f32, 0.0);
        let out = ctx.update(&FrameInput::new(object, config.camera));
        assert!(out.model_view_projection.as_array().iter().all(|v| v.is_finite()));
    }
    assert_eq!(ctx.frame_index(), u64::from(config.frames));
}
