//! Unit aware encoding of source kernel geometry into host kernel geometry.
//!
//! Source values (points, vectors, planes, transforms, curves, bounding boxes) are mapped into
//! their host counterparts through the [`Encode`] trait. Every encoding runs under a
//! [`Context`], which carries the unit factor applied to positions and lengths.
//!
//! ```rust
//! use geom_encode::*;
//!
//! let cx = Context::from_units(LengthUnit::Millimeters, LengthUnit::Feet);
//! let line = Line::new([0.0, 0.0, 0.0], [304.8, 0.0, 0.0]);
//! let host = line.encode_with(&cx).unwrap();
//! assert!((host.length() - 1.0).abs() < 1e-12);
//! ```
#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

mod bounds;
mod context;
mod curve;
pub mod encode;
mod error;
mod host;
mod nurbs;
mod plane;
mod point;
mod polyline;
mod xform;

pub use bounds::*;
pub use context::*;
pub use curve::*;
pub use encode::{aggregate::*, bounds::encode_outline, curve::*, vector::*, Encode};
pub use error::*;
pub use host::*;
pub use nurbs::{clamped_knots, NurbsCurve};
pub use plane::*;
pub use point::*;
pub use polyline::*;
pub use xform::*;
