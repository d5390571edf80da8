//! # stroke-raster
//!
//! Geometric normalization and anti-aliased rasterization of freehand
//! drawings: ordered point sequences captured from a pen, mouse or touch
//! surface, ready to be fed to a handwriting recognizer.
//!
//! - Affine primitives (shift, scale, resize, rotate, shear) applied in place
//! - Bounding box and center of mass
//! - Normalization: centering and viewbox fitting with optional aspect preservation
//! - Canvas-style stroking onto a fixed-size grid of `[0,1]` coverage values
//!
//! ## Architecture
//!
//! A [`Drawing`] flows through two halves:
//!
//! 1. **Transforms**: typed option structs resolve to a [`TransAffine`]
//!    that is applied to every point of the drawing
//! 2. **Normalization**: bounding box and centroid analysis drive
//!    compositions of those transforms
//! 3. **Stroke Outliner**: polylines become filled segment, cap and join polygons
//! 4. **Scanline Rasterizer**: clipped, converted to cells and swept into spans
//! 5. **Coverage Buffer**: spans are blended and extracted as a [`PixelGrid`]
//!
//! ```
//! use stroke_raster::{fit_view_box, rasterize, Drawing, FitViewBoxOptions, RasterOptions};
//!
//! let mut d = Drawing::from(vec![vec![[10.0, 10.0], [40.0, 30.0]]]);
//! fit_view_box(&mut d, &FitViewBoxOptions::square(28.0).preserve_aspect_ratio(true)).unwrap();
//! let grid = rasterize(&d, &RasterOptions::new(28, 28)).unwrap();
//! assert_eq!(grid.values().len(), 28 * 28);
//! ```

// Phase 1: Foundation Types & Math
pub mod basics;
pub mod error;
pub mod trans_affine;

// Phase 2: Drawing Model & Analysis
pub mod bounding_rect;
pub mod drawing;

// Phase 3: Transforms & Normalization
pub mod normalize;
pub mod options;
pub mod transforms;

// Phase 4: Scanline Rasterizer
pub mod rasterizer_cells_aa;
pub mod rasterizer_clip;
pub mod rasterizer_scanline_aa;
pub mod scanline_u;
pub mod stroke_outline;

// Phase 5: Output
pub mod pixel_grid;
pub mod rasterize;

pub use bounding_rect::{bounding_box, centroid, BoundingBox};
pub use drawing::{Drawing, Point, Stroke};
pub use error::{Result, TransformError};
pub use normalize::{center, fit_view_box};
pub use options::{
    CenterOptions, FitViewBoxOptions, ResizeOptions, RotateOptions, ScaleOptions, ShearOptions,
    ShiftOptions,
};
pub use pixel_grid::PixelGrid;
pub use rasterize::{rasterize, RasterOptions, Rasterizer};
pub use stroke_outline::{LineCap, LineJoin};
pub use trans_affine::TransAffine;
pub use transforms::{resize, rotate, scale, shear, shift};
