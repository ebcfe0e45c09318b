use std::path::PathBuf;

use thiserror::Error;

use crate::element::FH;

/// Errors reported at the boundary of the mesh kernel.
///
/// Editing operations never fail. These errors come from loading and saving
/// meshes, and from validating meshes assembled out of raw parts.
#[derive(Debug, Error)]
pub enum Error {
    // Validation.
    #[error("face {face} corner {corner} references position {index}, but there are {len}")]
    PositionOutOfBounds {
        face: FH,
        corner: usize,
        index: u32,
        len: usize,
    },
    #[error("face {face} corner {corner} references texture coordinate {index}, but there are {len}")]
    TexCoordOutOfBounds {
        face: FH,
        corner: usize,
        index: u32,
        len: usize,
    },
    #[error("face {face} corner {corner} references normal {index}, but there are {len}")]
    NormalOutOfBounds {
        face: FH,
        corner: usize,
        index: u32,
        len: usize,
    },
    #[error("face {0} has {1} corners, at least 3 are required")]
    DegenerateFace(FH, usize),
    // Obj.
    #[error("line {line}: face index {token:?} is out of bounds")]
    FaceIndexOutOfBounds { line: usize, token: String },
    #[error("failed to load obj file {path:?}: {reason}")]
    ObjLoadFailed { path: PathBuf, reason: String },
    #[error("obj model {0:?} has an incomplete coordinate array")]
    IncorrectNumberOfCoordinates(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
