//! Error types for mesh generation

/// Result alias used throughout the crate
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Errors produced by generators, mesh construction, and batching
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// A slice/stack/row/column count is below the generator's minimum
    #[error("{shape}: {param} must be at least {min}, got {value}")]
    CountTooSmall {
        shape: &'static str,
        param: &'static str,
        min: u32,
        value: u32,
    },

    /// A dimension is non-finite, or outside the range the generator needs
    #[error("{shape}: {param} must be {expected}, got {value}")]
    InvalidDimension {
        shape: &'static str,
        param: &'static str,
        expected: &'static str,
        value: f32,
    },

    /// 16-bit index narrowing requested for a mesh that is too large
    #[error(
        "{vertex_count} vertices cannot be addressed by 16-bit indices (max {max})",
        max = u16::MAX
    )]
    IndexOverflow { vertex_count: usize },

    /// Counts are valid individually but the vertex or index total does not fit in a `u32`
    #[error(
        "{shape}: {param} too large, mesh would exceed {max} vertices or indices",
        max = u32::MAX
    )]
    TooLarge {
        shape: &'static str,
        param: &'static str,
    },

    /// Appending a mesh would push a batch's buffers past 32-bit offsets
    #[error("batch '{batch}' cannot take '{submesh}': offsets would exceed {max}", max = u32::MAX)]
    BatchOverflow { batch: String, submesh: String },

    /// Index buffer length is not a multiple of 3
    #[error("index count {len} is not a multiple of 3")]
    MalformedIndices { len: usize },

    /// Index references a vertex past the end of the vertex buffer
    #[error("index {index} out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u32, vertex_count: usize },

    /// Submesh lookup by a name the batch does not contain
    #[error("no submesh named '{0}'")]
    UnknownSubmesh(String),

    /// Submesh inserted under a name that is already taken
    #[error("submesh '{0}' already exists")]
    DuplicateSubmesh(String),
}
