//! Mesh import helpers.
//!
//! I/O features are behind cargo feature-flags; see `stl-io`.

#[cfg(feature = "stl-io")]
mod stl;
