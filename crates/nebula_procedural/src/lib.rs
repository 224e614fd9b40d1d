//! # NEBULA Procedural Generation
//!
//! Point sets for every target shape the particle cloud can morph into.
//!
//! ## Design Principles
//!
//! 1. **Exact length**: `generate(kind, count, ..)` always returns `count` points
//! 2. **Index-aligned**: point `i` of every set belongs to particle `i`
//! 3. **Pure**: no state survives a call; the random stream is passed in
//! 4. **Never fails**: blank text falls back to the sphere, unknown kinds to random
//!
//! ## Core Components
//!
//! - `PointSet`: fixed-length, index-aligned positions
//! - `shapes`: one point function per `ShapeKind`, dispatched by tag
//! - `text`: offscreen rasterizer + built-in bitmap font
//! - `ShapeSeed`: seeded ChaCha streams for reproducible runs
//!
//! ## Example
//!
//! ```rust,ignore
//! use nebula_procedural::{ShapeGenerator, ShapeSeed};
//! use nebula_shared::ShapeKind;
//!
//! let mut generator = ShapeGenerator::new(ShapeSeed::new(42));
//! let sphere = generator.generate(ShapeKind::Sphere, 8000, "");
//! assert_eq!(sphere.len(), 8000);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod points;
pub mod seed;
pub mod shapes;
pub mod text;

pub use points::PointSet;
pub use seed::{ShapeRng, ShapeSeed};
pub use shapes::{generate, point_fn, PointFn, ShapeGenerator};
pub use text::{rasterize_text, TextCanvas};
