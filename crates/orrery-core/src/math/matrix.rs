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

//! Defines the row-major `Matrix4` type and its builders.
//!
//! A single type serves as model, view and projection matrix; which role an
//! instance plays is decided by how the caller builds and uses it. Instances
//! are long-lived and are rebuilt in place every frame, so most builders come
//! as a `set_*` method that overwrites the receiver plus a constructor that
//! starts from the identity.

use approx::{AbsDiffEq, RelativeEq};
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut, Mul};

use super::rotation::euler_basis;
use super::{MatrixError, MatrixResult, RotationInput, Vec3, EPSILON};

/// Row and column indices left over once one index is struck out, used to
/// pick the 3x3 minors.
const REMAINING: [[usize; 3]; 4] = [[1, 2, 3], [0, 2, 3], [0, 1, 3], [0, 1, 2]];

/// A 4x4 row-major homogeneous matrix.
///
/// ```text
/// [ m00 m01 m02 m03 ]      fwd_x side_x up_x pos_x
/// [ m10 m11 m12 m13 ]      fwd_y side_y up_y pos_y
/// [ m20 m21 m22 m23 ]      fwd_z side_z up_z pos_z
/// [ m30 m31 m32 m33 ]      0     0      0    1
/// ```
///
/// The upper-left 3x3 block is the linear part (rotation and scale), the
/// fourth column of the first three rows is the translation. The fourth row
/// stays `(0, 0, 0, 1)` for every builder except [`Matrix4::set_perspective`],
/// which writes `(0, 0, -1, 0)` so the GPU divides by `-z`.
///
/// Vectors are columns multiplied on the right: `(a * b) * p == a * (b * p)`,
/// so `b` is applied first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct Matrix4 {
    /// The rows of the matrix. `rows[r][c]` is the entry at row `r`, column `c`.
    pub rows: [[f32; 4]; 4],
}

impl Matrix4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// A 4x4 matrix with all elements set to 0.
    pub const ZERO: Self = Self {
        rows: [[0.0; 4]; 4],
    };

    // --- Construction & Reset ---

    /// Creates a new identity matrix.
    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Creates a matrix from its four rows.
    #[inline]
    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self { rows }
    }

    /// Resets the matrix to the identity in place.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Creates a translation matrix.
    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.set_translation(translation);
        m
    }

    /// Overwrites the matrix with a pure translation.
    ///
    /// All 16 entries are written: the linear part becomes the identity and
    /// nothing from the previous state carries over.
    pub fn set_translation(&mut self, translation: Vec3) {
        *self = Self::IDENTITY;
        self.write_translation(translation);
    }

    /// Creates a rotation matrix from Euler angles in radians.
    ///
    /// The rotations compose as `Rz(z) * Ry(y) * Rx(x)`.
    #[inline]
    pub fn from_rotation(angles: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.set_rotation(angles);
        m
    }

    /// Overwrites the matrix with a pure Euler rotation. Translation is
    /// zeroed and the fourth row is reset to `(0, 0, 0, 1)`.
    pub fn set_rotation(&mut self, angles: Vec3) {
        *self = Self::IDENTITY;
        self.write_linear(euler_basis(angles));
    }

    /// Creates a non-uniform scaling matrix, `diag(x, y, z, 1)`.
    #[inline]
    pub fn from_scale(scale: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.set_scale(scale);
        m
    }

    /// Overwrites the matrix with `diag(x, y, z, 1)`.
    pub fn set_scale(&mut self, scale: Vec3) {
        *self = Self::IDENTITY;
        self.rows[0][0] = scale.x;
        self.rows[1][1] = scale.y;
        self.rows[2][2] = scale.z;
    }

    // --- Composition ---

    /// Returns `self * other` without touching either operand.
    pub fn multiplied(&self, other: &Matrix4) -> Matrix4 {
        let mut out = Self::ZERO;
        for (r, row) in out.rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = self.rows[r][0] * other.rows[0][c]
                    + self.rows[r][1] * other.rows[1][c]
                    + self.rows[r][2] * other.rows[2][c]
                    + self.rows[r][3] * other.rows[3][c];
            }
        }
        out
    }

    /// Multiplies in place: `self <- self * other`.
    ///
    /// `other`'s transform is applied first, then the receiver's. Both
    /// operands are read in full before the receiver is written, so squaring
    /// a matrix through a copy (`let s = m; m.multiply(&s)`) is well defined.
    #[inline]
    pub fn multiply(&mut self, other: &Matrix4) {
        *self = self.multiplied(other);
    }

    /// Copies every entry into `dest`.
    #[inline]
    pub fn copy_to(&self, dest: &mut Matrix4) {
        *dest = *self;
    }

    /// Overwrites every entry with the entries of `src`.
    #[inline]
    pub fn copy_from(&mut self, src: &Matrix4) {
        *self = *src;
    }

    /// Adds `delta` to the translation column, leaving the linear part alone.
    #[inline]
    pub fn offset(&mut self, delta: Vec3) {
        self.rows[0][3] += delta.x;
        self.rows[1][3] += delta.y;
        self.rows[2][3] += delta.z;
    }

    // --- Composite Transform ---

    /// Creates a model matrix from translation, rotation and scale.
    pub fn from_transformation(translation: Vec3, rotation: RotationInput, scale: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.set_transformation(translation, rotation, scale);
        m
    }

    /// Builds a model matrix in one pass.
    ///
    /// The rotation block comes from `rotation`, then each column of the
    /// linear part is multiplied by the matching scale factor, so scaling
    /// happens along the object's own (rotated) axes. Quaternions are used
    /// as given; a non-unit quaternion yields a non-orthonormal block.
    pub fn set_transformation(&mut self, translation: Vec3, rotation: RotationInput, scale: Vec3) {
        self.write_translation(translation);
        self.write_linear(rotation.rotation_basis());
        for row in self.rows.iter_mut().take(3) {
            row[0] *= scale.x;
            row[1] *= scale.y;
            row[2] *= scale.z;
        }
        self.rows[3] = [0.0, 0.0, 0.0, 1.0];
    }

    // --- Decomposition ---

    /// Returns the length of each of the first three columns.
    ///
    /// Only magnitudes are recovered: a mirrored transform (negative scale on
    /// one axis) reports the same scale as its unmirrored counterpart.
    pub fn scale(&self) -> Vec3 {
        Vec3::new(
            self.column_vec3(0).length(),
            self.column_vec3(1).length(),
            self.column_vec3(2).length(),
        )
    }

    /// Re-orients the matrix as a world-space pivot at `position` whose first
    /// axis points away from `target`.
    ///
    /// The basis is `forward = normalize(position - target)`,
    /// `side = normalize(up x forward)`, `up' = forward x side`, written as
    /// columns 0, 1 and 2 and scaled by `scale`, or by the matrix's current
    /// [`Matrix4::scale`] when `scale` is `None`. The fourth row is untouched.
    ///
    /// When `up` is parallel to `position - target`, or `position == target`,
    /// the side and up axes collapse to zero and the result is singular. No
    /// NaN is produced; callers that need an invertible pivot must pick a
    /// different `up`.
    pub fn look_at_from(&mut self, position: Vec3, target: Vec3, up: Vec3, scale: Option<Vec3>) {
        let scale = scale.unwrap_or_else(|| self.scale());
        let forward = (position - target).normalize();
        let side = up.cross(forward).normalize();
        let up = forward.cross(side);

        self.write_column(0, forward * scale.x);
        self.write_column(1, side * scale.y);
        self.write_column(2, up * scale.z);
        self.write_translation(position);
    }

    // --- Algebra ---

    /// Computes the determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> f32 {
        (0..4)
            .map(|c| self.rows[0][c] * self.cofactor(0, c))
            .sum()
    }

    /// Computes the inverse as the adjugate divided by the determinant.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::Singular`] when the determinant is exactly zero.
    pub fn inverse(&self) -> MatrixResult<Matrix4> {
        let det = self.determinant();
        if det == 0.0 {
            log::trace!("Refusing to invert a singular matrix:\n{}", self);
            return Err(MatrixError::Singular);
        }

        let inv_det = 1.0 / det;
        let mut out = Self::ZERO;
        for (r, row) in out.rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                // Adjugate is the transposed cofactor matrix.
                *cell = self.cofactor(c, r) * inv_det;
            }
        }
        Ok(out)
    }

    /// Inverts the matrix in place.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::Singular`] when the determinant is exactly
    /// zero, in which case the matrix is left unchanged. Callers that treat
    /// this as a no-op can discard the result with `.ok()`.
    pub fn invert(&mut self) -> MatrixResult<()> {
        *self = self.inverse()?;
        Ok(())
    }

    /// Returns the transpose of the matrix, where rows and columns are swapped.
    pub fn transpose(&self) -> Self {
        let mut out = Self::ZERO;
        for (r, row) in self.rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                out.rows[c][r] = *value;
            }
        }
        out
    }

    // --- Camera & Projection ---

    /// Creates a perspective projection matrix. See [`Matrix4::set_perspective`].
    pub fn perspective(fov_y_radians: f32, z_near: f32, z_far: f32, aspect_ratio: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.set_perspective(fov_y_radians, z_near, z_far, aspect_ratio);
        m
    }

    /// Overwrites the matrix with an OpenGL-style perspective projection.
    ///
    /// The frustum is symmetric: `top = near * tan(fov / 2)` and
    /// `right = top * aspect_ratio`. Depth maps to `[-1, 1]` and the fourth
    /// row is `(0, 0, -1, 0)`, leaving the divide by `-z` to the GPU.
    ///
    /// # Arguments
    ///
    /// * `fov_y_radians`: Full vertical field of view in radians.
    /// * `z_near`: Distance to the near clipping plane.
    /// * `z_far`: Distance to the far clipping plane.
    /// * `aspect_ratio`: Width divided by height of the viewport.
    pub fn set_perspective(
        &mut self,
        fov_y_radians: f32,
        z_near: f32,
        z_far: f32,
        aspect_ratio: f32,
    ) {
        let top = z_near * (fov_y_radians * 0.5).tan();
        let bottom = -top;
        let right = top * aspect_ratio;
        let left = -right;

        self.rows = [
            [
                2.0 * z_near / (right - left),
                0.0,
                (right + left) / (right - left),
                0.0,
            ],
            [
                0.0,
                2.0 * z_near / (top - bottom),
                (top + bottom) / (top - bottom),
                0.0,
            ],
            [
                0.0,
                0.0,
                -(z_far + z_near) / (z_far - z_near),
                -2.0 * z_far * z_near / (z_far - z_near),
            ],
            [0.0, 0.0, -1.0, 0.0],
        ];
    }

    /// Creates an orthographic projection matrix. See [`Matrix4::set_orthographic`].
    pub fn orthographic(
        fov_y_radians: f32,
        size: f32,
        z_near: f32,
        z_far: f32,
        aspect_ratio: f32,
    ) -> Self {
        let mut m = Self::IDENTITY;
        m.set_orthographic(fov_y_radians, size, z_near, z_far, aspect_ratio);
        m
    }

    /// Overwrites the matrix with an OpenGL-style orthographic projection.
    ///
    /// The view volume is sized by `size` rather than by the near distance:
    /// `top = size * tan(fov / 2)`, `right = top * aspect_ratio`. The fourth
    /// row is the usual `(0, 0, 0, 1)`.
    pub fn set_orthographic(
        &mut self,
        fov_y_radians: f32,
        size: f32,
        z_near: f32,
        z_far: f32,
        aspect_ratio: f32,
    ) {
        let top = size * (fov_y_radians * 0.5).tan();
        let bottom = -top;
        let right = top * aspect_ratio;
        let left = -right;

        self.rows = [
            [
                2.0 / (right - left),
                0.0,
                0.0,
                -(right + left) / (right - left),
            ],
            [
                0.0,
                2.0 / (top - bottom),
                0.0,
                -(top + bottom) / (top - bottom),
            ],
            [
                0.0,
                0.0,
                -2.0 / (z_far - z_near),
                -(z_far + z_near) / (z_far - z_near),
            ],
            [0.0, 0.0, 0.0, 1.0],
        ];
    }

    /// Creates a right-handed view matrix. See [`Matrix4::set_view`].
    pub fn view(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.set_view(eye, target, up);
        m
    }

    /// Overwrites the matrix with a right-handed look-at view matrix.
    ///
    /// The camera axes `z = normalize(eye - target)`, `x = normalize(up x z)`
    /// and `y = z x x` become the rows of the linear part, and each row's
    /// translation is `-dot(axis, eye)`, so `eye` lands on the origin.
    ///
    /// Unlike [`Matrix4::look_at_from`] this is the inverse of a camera's
    /// world transform, not a world-space orientation. Degenerate inputs
    /// (`eye == target`, or `up` parallel to the view direction) collapse the
    /// affected axes to zero; use [`Matrix4::try_view`] to reject them.
    pub fn set_view(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        let z = (eye - target).normalize();
        let x = up.cross(z).normalize();
        let y = z.cross(x);

        self.rows = [
            [x.x, x.y, x.z, -x.dot(eye)],
            [y.x, y.y, y.z, -y.dot(eye)],
            [z.x, z.y, z.z, -z.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ];
    }

    /// Builds a view matrix, rejecting inputs that have no well-defined basis.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DegenerateBasis`] if `eye` and `target` are too
    /// close, or if `up` is parallel to the view direction.
    pub fn try_view(eye: Vec3, target: Vec3, up: Vec3) -> MatrixResult<Self> {
        let backward = eye - target;
        if backward.length_squared() < EPSILON * EPSILON {
            log::warn!("View matrix rejected: eye {eye:?} coincides with target {target:?}");
            return Err(MatrixError::DegenerateBasis("eye and target coincide"));
        }
        if up.cross(backward.normalize()).length_squared() < EPSILON * EPSILON {
            log::warn!("View matrix rejected: up {up:?} is parallel to the view direction");
            return Err(MatrixError::DegenerateBasis(
                "up vector is parallel to the view direction",
            ));
        }
        Ok(Self::view(eye, target, up))
    }

    // --- Accessors ---

    /// Returns row `index` as an array.
    ///
    /// # Panics
    /// Panics if `index >= 4`.
    #[inline]
    pub fn row(&self, index: usize) -> [f32; 4] {
        self.rows[index]
    }

    /// Returns column `index` as an array.
    ///
    /// # Panics
    /// Panics if `index >= 4`.
    #[inline]
    pub fn column(&self, index: usize) -> [f32; 4] {
        [
            self.rows[0][index],
            self.rows[1][index],
            self.rows[2][index],
            self.rows[3][index],
        ]
    }

    /// Returns the translation column (rows 0 to 2 of column 3).
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.column_vec3(3)
    }

    /// Views the 16 entries in row-major order, ready to upload as a uniform.
    #[inline]
    pub fn as_array(&self) -> &[f32; 16] {
        bytemuck::cast_ref(&self.rows)
    }

    /// Returns the 16 entries in column-major order, for consumers that
    /// expect the transposed layout.
    #[inline]
    pub fn to_column_major(&self) -> [f32; 16] {
        *self.transpose().as_array()
    }

    /// Transforms a point (`w = 1`), applying translation. No perspective
    /// divide is performed.
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let r = &self.rows;
        Vec3::new(
            r[0][0] * p.x + r[0][1] * p.y + r[0][2] * p.z + r[0][3],
            r[1][0] * p.x + r[1][1] * p.y + r[1][2] * p.z + r[1][3],
            r[2][0] * p.x + r[2][1] * p.y + r[2][2] * p.z + r[2][3],
        )
    }

    /// Transforms a direction (`w = 0`), ignoring translation.
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let r = &self.rows;
        Vec3::new(
            r[0][0] * v.x + r[0][1] * v.y + r[0][2] * v.z,
            r[1][0] * v.x + r[1][1] * v.y + r[1][2] * v.z,
            r[2][0] * v.x + r[2][1] * v.y + r[2][2] * v.z,
        )
    }

    // --- Internal Helpers ---

    fn column_vec3(&self, index: usize) -> Vec3 {
        Vec3::new(
            self.rows[0][index],
            self.rows[1][index],
            self.rows[2][index],
        )
    }

    fn write_column(&mut self, index: usize, v: Vec3) {
        self.rows[0][index] = v.x;
        self.rows[1][index] = v.y;
        self.rows[2][index] = v.z;
    }

    fn write_translation(&mut self, translation: Vec3) {
        self.write_column(3, translation);
    }

    fn write_linear(&mut self, block: [[f32; 3]; 3]) {
        for (row, src) in self.rows.iter_mut().zip(block) {
            row[..3].copy_from_slice(&src);
        }
    }

    /// Determinant of the 3x3 matrix left after removing `row` and `col`.
    fn minor(&self, row: usize, col: usize) -> f32 {
        let [r0, r1, r2] = REMAINING[row];
        let [c0, c1, c2] = REMAINING[col];
        let m = |r: usize, c: usize| self.rows[r][c];

        m(r0, c0) * (m(r1, c1) * m(r2, c2) - m(r1, c2) * m(r2, c1))
            - m(r0, c1) * (m(r1, c0) * m(r2, c2) - m(r1, c2) * m(r2, c0))
            + m(r0, c2) * (m(r1, c0) * m(r2, c1) - m(r1, c1) * m(r2, c0))
    }

    fn cofactor(&self, row: usize, col: usize) -> f32 {
        let minor = self.minor(row, col);
        if (row + col) % 2 == 0 {
            minor
        } else {
            -minor
        }
    }
}

// --- Operators Overloading ---

impl Default for Matrix4 {
    /// Returns the 4x4 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Matrix4> for Matrix4 {
    type Output = Self;
    /// Multiplies this matrix by another `Matrix4`. Note that matrix multiplication is not commutative.
    #[inline]
    fn mul(self, rhs: Matrix4) -> Self::Output {
        self.multiplied(&rhs)
    }
}

impl Mul<Vec3> for Matrix4 {
    type Output = Vec3;
    /// Transforms a `Vec3` as a point.
    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        self.transform_point(rhs)
    }
}

impl Index<usize> for Matrix4 {
    type Output = [f32; 4];
    /// Allows accessing a matrix row by index.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.rows[index]
    }
}

impl IndexMut<usize> for Matrix4 {
    /// Allows mutably accessing a matrix row by index.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.rows[index]
    }
}

impl Index<(usize, usize)> for Matrix4 {
    type Output = f32;
    /// Accesses the entry at `(row, col)`.
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.rows[row][col]
    }
}

impl IndexMut<(usize, usize)> for Matrix4 {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.rows[row][col]
    }
}

impl fmt::Display for Matrix4 {
    /// Four lines of four tab-separated values. Meant for logs, not parsing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}\t{}\t{}\t{}", row[0], row[1], row[2], row[3])?;
        }
        Ok(())
    }
}

impl AbsDiffEq for Matrix4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.as_array()
            .iter()
            .zip(other.as_array())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Matrix4 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.as_array()
            .iter()
            .zip(other.as_array())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

// --- Tests ---
