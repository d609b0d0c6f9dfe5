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

//! Errors reported by matrix operations that can fail.

use thiserror::Error;

/// A specialized `Result` type for matrix operations.
pub type MatrixResult<T> = Result<T, MatrixError>;

/// An error produced when a matrix operation cannot yield a meaningful result.
///
/// None of these are raised by the infallible builders; they only come out of
/// the operations that explicitly return a [`MatrixResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// The determinant is exactly zero, so the matrix has no inverse.
    #[error("matrix is singular (determinant is zero) and cannot be inverted")]
    Singular,
    /// A raw rotation slice had neither 3 (Euler) nor 4 (quaternion) components.
    #[error("rotation input must have 3 (Euler) or 4 (quaternion) components, got {0}")]
    InvalidRotationLength(usize),
    /// An orthonormal basis could not be derived from the given vectors.
    #[error("cannot build an orthonormal basis: {0}")]
    DegenerateBasis(&'static str),
}
