//! Fast **closest-point queries** against static triangle meshes.
//!
//! A [`ClosestPointQuery`] is built once from a [`Mesh`]: every triangle is copied into
//! a [`TriangleStore`](store::TriangleStore) and its bounding box inserted into a spatial
//! [index](index). Each query then visits only the triangles whose boxes touch the region
//! `query_point ± max_distance` and computes the exact closest point on each, pruning
//! triangles whose plane is already farther than the best point found.
//!
//! ```
//! use meshprobe::{ClosestPointQuery, Mesh};
//! use nalgebra::Point3;
//!
//! let mesh = Mesh::new(
//!     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
//!     vec![0, 1, 2],
//! );
//! let query = ClosestPointQuery::new(&mesh)?;
//!
//! // Projects onto the hypotenuse
//! let hit = query.closest_hit(&Point3::new(2.0, 2.0, 0.0), 10.0).unwrap();
//! assert_eq!(hit.point, Point3::new(0.5, 0.5, 0.0));
//! assert_eq!(hit.distance_squared, 4.5);
//!
//! // Nothing within reach
//! assert!(query.find_closest_point(&Point3::new(0.0, 0.0, 50.0), 1.0).is_none());
//! # Ok::<(), meshprobe::errors::MeshError>(())
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` import via `Mesh::from_stl`
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon for batch queries

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod index;
pub mod io;
pub mod mesh;
pub mod query;
pub mod store;
pub mod triangle;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::MeshError;
pub use index::{BvhIndex, FlatIndex, SearchRegion, SpatialIndex, Traversal};
pub use mesh::Mesh;
pub use query::{ClosestHit, ClosestPointQuery, Feature, QueryConfig, QueryStats};
pub use store::TriangleStore;
pub use triangle::{Triangle, TriangleId};
