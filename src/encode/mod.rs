//! Encoding of source geometry into host geometry.
//!
//! Every encoder is a pure function of the source value and a [`Context`].
//! Positions and lengths are multiplied by [`Context::factor`]; directions, weights, knots, and
//! angles never are. A factor of exactly `1.0` copies coordinates without any arithmetic.
use crate::*;

pub mod aggregate;
pub mod bounds;
pub mod curve;
pub mod vector;
pub mod xform;

/// Conversion of a source value into its host counterpart.
pub trait Encode {
    type Output;

    /// Encode under the given context.
    fn encode_with(&self, cx: &Context) -> Result<Self::Output>;

    /// Encode under the process-wide default context, see [`Context::install`].
    fn encode(&self) -> Result<Self::Output> {
        self.encode_with(Context::global())
    }

    /// Encode with an explicit unit factor, keeping the default tolerances.
    fn encode_by(&self, factor: f64) -> Result<Self::Output> {
        let cx = Context::global().with_factor(factor)?;
        self.encode_with(&cx)
    }
}

/// Scales a single length.
///
/// A finite value that overflows once scaled is a [`Fault::NumericOverflow`]; non-finite values
/// pass through.
#[allow(clippy::float_cmp)]
pub(crate) fn scale(value: f64, factor: f64) -> Result<f64> {
    if factor == 1.0 {
        return Ok(value);
    }

    let x = value * factor;
    if value.is_finite() && !x.is_finite() {
        log::warn!("scaling {} by {} overflows", value, factor);
        return Err(Fault::NumericOverflow { value, factor });
    }
    Ok(x)
}

pub(crate) fn scale2(p: Point2, factor: f64) -> Result<Point2> {
    let [x, y] = p;
    Ok([scale(x, factor)?, scale(y, factor)?])
}

pub(crate) fn scale3(p: Point3, factor: f64) -> Result<Point3> {
    let [x, y, z] = p;
    Ok([scale(x, factor)?, scale(y, factor)?, scale(z, factor)?])
}

/// Scales a source location into a host coordinate.
pub(crate) fn xyz(p: Point3, cx: &Context) -> Result<Xyz> {
    scale3(p, cx.factor).map(Xyz)
}

/// Frames must be orthonormal, they are never corrected.
pub(crate) fn orthonormal(plane: &Plane) -> Result<()> {
    if plane.is_orthonormal() {
        Ok(())
    } else {
        Err(Fault::invalid(format!(
            "plane axes {:?} and {:?} are not orthonormal",
            plane.x_axis.0, plane.y_axis.0
        )))
    }
}
