//! Error taxonomy shared by the transform pipeline and the rasterizer.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("drawing contains no points")]
    EmptyDrawing,

    #[error("missing required option: {0}")]
    MissingOption(&'static str),

    #[error("division by zero: {0} is 0")]
    DivisionByZero(&'static str),

    #[error("invalid raster dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("invalid value for option '{name}': {value}")]
    InvalidOption { name: &'static str, value: f64 },

    #[error("non-finite coordinate at stroke {stroke}, point {index}")]
    NonFinitePoint { stroke: usize, index: usize },
}

pub type Result<T> = std::result::Result<T, TransformError>;
