//! cell_grid - sparse uniform grid for marking and querying 3D geometry
//!
//! Points, triangles and axis-aligned rectangles are quantized into cubic
//! cells of a fixed size. Marked cells are kept per layer key and answered by
//! sphere and box queries without rescanning the marked geometry.
//!
//! # Features
//!
//! - **Face-stripe marching**: triangles mark only the cells their surface
//!   touches, not their whole bounding box
//! - **Deferred marking**: triangles can be registered now and marched when a
//!   query region first reaches them
//! - **Layer keys**: marks are grouped by key; queries include or exclude keys
//! - **Debug wireframes**: merged edge lines for drawing marked cells
//!
//! # Example
//!
//! ```ignore
//! use cell_grid::{KeyFilter, SpatialGrid, Triangle};
//! use glam::DVec3;
//!
//! let mut grid = SpatialGrid::with_cell_size(1.0)?;
//! grid.mark_point(DVec3::new(5.0, 0.0, 0.0), "obstacle")?;
//! grid.mark_triangle(&wall, "walls", false)?;
//!
//! let near = grid.query_sphere(DVec3::ZERO, 6.0, true, &KeyFilter::all())?;
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod intersect;
pub mod types;

pub use config::GridConfig;
pub use error::{GridError, GridResult};
pub use intersect::{aabb_intersects_sphere, triangle_intersection, TriangleContact};
pub use types::{Aabb, CellIndex, MarkResult, Rect, Triangle};

// Monotonic handles for grids and deferred marks
pub mod token;
pub use token::{GridId, PendingId};

// Grid core: index mapping, marching, layered store, pending queue
pub mod grid;
pub use grid::{CellSlice, KeyFilter, LayerKey, SpatialGrid};

// Marking statistics (feature = "metrics")
pub mod metrics;
pub use metrics::GridMetrics;

// Wireframe helper for visualization
pub mod debug_lines;
pub use debug_lines::{debug_lines, LineSegment};
