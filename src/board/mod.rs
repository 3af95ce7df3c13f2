//! Procedural board layout.
//!
//! [`generate`] turns a [`LayoutParameters`] value into an immutable
//! [`BoardLayout`]. The builders it runs are plain functions over borrowed inputs
//! and share no state:
//!
//! - [`grid::build`] lays out the N×N cells and the colored cross path,
//! - [`sections::build`] places the four home sections with their safe squares,
//! - [`tokens::build`] puts four start markers in every section,
//! - [`center::build`] splits the finishing square into four wedges,
//! - [`outline::outline`] derives a border for any of the above.

pub mod center;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod layout;
pub mod outline;
pub mod params;
pub mod record;
pub mod sections;
pub mod tokens;

#[cfg(test)]
mod tests;

pub use error::LayoutError;
pub use geometry::{Placement, PrimitiveKind, Segment, Shape};
pub use layout::{BoardLayout, Primitive, generate};
pub use outline::{OUTLINE_COLOR, Outline};
pub use params::{
    Arm, BoardVariant, Color, Elevations, LayoutParameters, LayoutStyle, MarkerShape,
    OutlinePolicy, Quadrant, SafeSquareInset,
};
pub use record::PrimitiveRecord;
