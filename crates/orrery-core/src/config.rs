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

//! Scene configuration loaded from JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::camera::CameraRig;
use crate::frame::ObjectTransform;

/// An error raised while loading or saving a [`SceneConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to access scene configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration text is not valid scene JSON.
    #[error("failed to parse scene configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Describes the camera, the object and how the demo animates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// The camera used for every frame.
    pub camera: CameraRig,
    /// The object's starting transform.
    pub object: ObjectTransform,
    /// Yaw added to the object every frame, in radians.
    pub spin_radians_per_frame: f32,
    /// Number of frames to simulate.
    pub frames: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraRig::default(),
            object: ObjectTransform::identity(),
            spin_radians_per_frame: 15.0_f32.to_radians(),
            frames: 4,
        }
    }
}

impl SceneConfig {
    /// Load a scene configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scene configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        log::info!("Loaded scene configuration from {}", path.display());
        Ok(config)
    }

    /// Save the scene configuration to a JSON file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
