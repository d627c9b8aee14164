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

//! Defines the hierarchy of error types for the rendering backend contract.

use crate::renderer::api::TextureId;
use std::fmt;

/// An error related to the creation or use of a GPU resource (textures, vertex buffers).
#[derive(Debug)]
pub enum ResourceError {
    /// The texture handle does not refer to a live texture.
    InvalidTexture(TextureId),
    /// The texel data does not match the texture's declared size and format.
    InvalidTextureData {
        /// Number of bytes the descriptor implies.
        expected: usize,
        /// Number of bytes actually provided.
        actual: usize,
    },
    /// The vertex data is not a whole number of vertices.
    MisalignedVertexData(usize),
    /// A draw was requested for more vertices than were uploaded.
    OutOfBounds {
        /// Vertices requested by the draw.
        requested: u32,
        /// Vertices available in the last upload.
        available: u32,
    },
    /// An error originating from the specific graphics backend implementation.
    BackendError(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::InvalidTexture(id) => write!(f, "Invalid texture handle: {id:?}"),
            ResourceError::InvalidTextureData { expected, actual } => write!(
                f,
                "Texture data size mismatch: expected {expected} bytes, got {actual}"
            ),
            ResourceError::MisalignedVertexData(len) => {
                write!(f, "Vertex data of {len} bytes is not a whole number of vertices")
            }
            ResourceError::OutOfBounds {
                requested,
                available,
            } => write!(
                f,
                "Draw of {requested} vertices exceeds the {available} uploaded"
            ),
            ResourceError::BackendError(msg) => {
                write!(f, "Backend-specific resource error: {msg}")
            }
        }
    }
}

impl std::error::Error for ResourceError {}

/// A high-level error that can occur while rendering a frame.
#[derive(Debug)]
pub enum RenderError {
    /// A frame was requested before any level was loaded.
    NoLevel,
    /// An error occurred while managing a GPU resource.
    ResourceError(ResourceError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::NoLevel => write!(f, "No level is loaded."),
            RenderError::ResourceError(err) => {
                write!(f, "Graphics resource operation failed: {err}")
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::ResourceError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ResourceError> for RenderError {
    fn from(err: ResourceError) -> Self {
        RenderError::ResourceError(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn resource_error_display() {
        let err = ResourceError::InvalidTexture(TextureId(7));
        assert_eq!(format!("{err}"), "Invalid texture handle: TextureId(7)");

        let err = ResourceError::OutOfBounds {
            requested: 12,
            available: 6,
        };
        assert_eq!(format!("{err}"), "Draw of 12 vertices exceeds the 6 uploaded");
    }

    #[test]
    fn render_error_display_wrapping_resource_error() {
        let res_err = ResourceError::BackendError("device lost".to_string());
        let render_err: RenderError = res_err.into();
        assert_eq!(
            format!("{render_err}"),
            "Graphics resource operation failed: Backend-specific resource error: device lost"
        );
        assert!(render_err.source().is_some());
        assert!(RenderError::NoLevel.source().is_none());
    }
}
