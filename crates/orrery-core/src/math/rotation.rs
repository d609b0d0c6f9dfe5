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

//! Rotation inputs accepted by the composite transform builder.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use super::{MatrixError, MatrixResult, Vec3};

/// The rotation part of a model transform.
///
/// Callers pick the representation explicitly: three Euler angles or a
/// quaternion. Raw slices coming from untyped sources go through
/// [`RotationInput::from_slice`], which rejects any other length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Encode, Decode)]
#[serde(rename_all = "snake_case")]
pub enum RotationInput {
    /// Euler angles in radians about X, Y and Z, composed as `Rz * Ry * Rx`.
    Euler(Vec3),
    /// A rotation quaternion `(x, y, z, w)`. Expected to be unit length;
    /// this is not checked.
    Quaternion {
        /// The x component of the vector part.
        x: f32,
        /// The y component of the vector part.
        y: f32,
        /// The z component of the vector part.
        z: f32,
        /// The scalar part.
        w: f32,
    },
}

impl RotationInput {
    /// No rotation.
    pub const IDENTITY: Self = Self::Euler(Vec3::ZERO);

    /// Creates an Euler-angle rotation.
    #[inline]
    pub const fn euler(x: f32, y: f32, z: f32) -> Self {
        Self::Euler(Vec3::new(x, y, z))
    }

    /// Creates a quaternion rotation.
    #[inline]
    pub const fn quaternion(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self::Quaternion { x, y, z, w }
    }

    /// Creates a unit quaternion rotating `angle` radians about `axis`.
    ///
    /// `axis` is normalized first; a zero axis yields the identity quaternion.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalize();
        let (s, c) = (angle * 0.5).sin_cos();
        if axis == Vec3::ZERO {
            return Self::quaternion(0.0, 0.0, 0.0, 1.0);
        }
        Self::quaternion(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// Interprets a raw component slice: 3 values are Euler angles, 4 values
    /// are a quaternion `(x, y, z, w)`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidRotationLength`] for any other length.
    pub fn from_slice(components: &[f32]) -> MatrixResult<Self> {
        match *components {
            [x, y, z] => Ok(Self::euler(x, y, z)),
            [x, y, z, w] => Ok(Self::quaternion(x, y, z, w)),
            _ => Err(MatrixError::InvalidRotationLength(components.len())),
        }
    }

    /// Returns the row-major 3x3 rotation block for this input.
    pub fn rotation_basis(&self) -> [[f32; 3]; 3] {
        match *self {
            Self::Euler(angles) => euler_basis(angles),
            Self::Quaternion { x, y, z, w } => quaternion_basis(x, y, z, w),
        }
    }
}

impl Default for RotationInput {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TryFrom<&[f32]> for RotationInput {
    type Error = MatrixError;

    fn try_from(components: &[f32]) -> MatrixResult<Self> {
        Self::from_slice(components)
    }
}

impl From<Vec3> for RotationInput {
    fn from(angles: Vec3) -> Self {
        Self::Euler(angles)
    }
}

/// Rotation block for Euler angles, `R = Rz(z) * Ry(y) * Rx(x)`.
pub(crate) fn euler_basis(angles: Vec3) -> [[f32; 3]; 3] {
    let (sa, ca) = angles.z.sin_cos();
    let (sb, cb) = angles.y.sin_cos();
    let (sc, cc) = angles.x.sin_cos();

    [
        [ca * cb, ca * sb * sc - sa * cc, ca * sb * cc + sa * sc],
        [sa * cb, sa * sb * sc + ca * cc, sa * sb * cc - ca * sc],
        [-sb, cb * sc, cb * cc],
    ]
}

fn quaternion_basis(x: f32, y: f32, z: f32, w: f32) -> [[f32; 3]; 3] {
    let x2 = x + x;
    let y2 = y + y;
    let z2 = z + z;
    let xx = x * x2;
    let xy = x * y2;
    let xz = x * z2;
    let yy = y * y2;
    let yz = y * z2;
    let zz = z * z2;
    let wx = w * x2;
    let wy = w * y2;
    let wz = w * z2;

    [
        [1.0 - (yy + zz), xy - wz, xz + wy],
        [xy + wz, 1.0 - (xx + zz), yz - wx],
        [xz - wy, yz + wx, 1.0 - (xx + yy)],
    ]
}
