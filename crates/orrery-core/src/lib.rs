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

//! # Orrery Core
//!
//! Row-major 4x4 homogeneous matrices used to build the model, view and
//! projection transforms of a real-time 3D pipeline, plus the per-frame
//! context that composes them in a fixed order.

#![warn(missing_docs)]

pub mod camera;
pub mod config;
pub mod frame;
pub mod math;

pub use camera::{CameraRig, Projection};
pub use config::{ConfigError, SceneConfig};
pub use frame::{FrameContext, FrameInput, FrameMatrices, ObjectTransform};
pub use math::{Matrix4, MatrixError, MatrixResult, RotationInput, Vec3};
