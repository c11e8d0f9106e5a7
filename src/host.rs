//! Host kernel values.
//!
//! These are what the encoders produce. Every length is in host internal units.
use crate::*;
use std::f64::consts::TAU;

const COLLINEAR_SINE: f64 = 1e-12;

/// A host 2D coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Uv(pub Point2);

impl Uv {
    pub fn u(&self) -> f64 {
        self.0[0]
    }

    pub fn v(&self) -> f64 {
        self.0[1]
    }
}

/// A host 3D coordinate, either a location or a direction.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Xyz(pub Point3);

impl Xyz {
    pub const ZERO: Xyz = Xyz([0.0; 3]);

    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }

    pub fn z(&self) -> f64 {
        self.0[2]
    }

    pub fn length(&self) -> f64 {
        self.0.mag()
    }

    pub fn normalize(&self) -> Xyz {
        Xyz(self.0.unit())
    }

    pub fn add(&self, rhs: Xyz) -> Xyz {
        Xyz(self.0.add(rhs.0))
    }

    pub fn subtract(&self, rhs: Xyz) -> Xyz {
        Xyz(self.0.sub(rhs.0))
    }

    pub fn multiply(&self, scalar: f64) -> Xyz {
        Xyz(self.0.scale(scalar))
    }

    pub fn dot(&self, rhs: Xyz) -> f64 {
        dot_prod(self.0, rhs.0)
    }

    pub fn cross(&self, rhs: Xyz) -> Xyz {
        Xyz(xprod(self.0, rhs.0))
    }

    pub fn distance_to(&self, rhs: Xyz) -> f64 {
        dist(self.0, rhs.0)
    }

    pub fn is_almost_equal_to(&self, rhs: Xyz, tolerance: f64) -> bool {
        self.distance_to(rhs) <= tolerance
    }
}

/// A host point object.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HostPoint {
    pub coord: Xyz,
}

/// A host plane: origin, orthonormal X/Y basis and their normal.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HostPlane {
    pub origin: Xyz,
    pub x_vec: Xyz,
    pub y_vec: Xyz,
    pub normal: Xyz,
}

/// A host transform, stored as its origin and basis columns.
///
/// The basis is carried as given: it may hold scale, shear, or a reflection.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HostTransform {
    pub origin: Xyz,
    pub basis_x: Xyz,
    pub basis_y: Xyz,
    pub basis_z: Xyz,
}

impl Default for HostTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl HostTransform {
    pub fn identity() -> Self {
        Self::translation(Xyz::ZERO)
    }

    pub fn translation(origin: Xyz) -> Self {
        Self {
            origin,
            basis_x: Xyz(Vec3::X.0),
            basis_y: Xyz(Vec3::Y.0),
            basis_z: Xyz(Vec3::Z.0),
        }
    }

    /// The length of basis X.
    pub fn scale(&self) -> f64 {
        self.basis_x.length()
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Returns if the basis is left handed.
    pub fn has_reflection(&self) -> bool {
        self.basis_x.cross(self.basis_y).dot(self.basis_z) < 0.0
    }

    pub fn of_point(&self, p: Xyz) -> Xyz {
        self.origin.add(self.of_vector(p))
    }

    pub fn of_vector(&self, v: Xyz) -> Xyz {
        self.basis_x
            .multiply(v.x())
            .add(self.basis_y.multiply(v.y()))
            .add(self.basis_z.multiply(v.z()))
    }
}

/// A host bounding box, extents in the frame of `transform`.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBoxXyz {
    pub transform: HostTransform,
    pub min: Xyz,
    pub max: Xyz,
    pub enabled: bool,
}

impl BoundingBoxXyz {
    /// The eight corners in world coordinates.
    pub fn corners(&self) -> [Xyz; 8] {
        let [x0, y0, z0] = self.min.0;
        let [x1, y1, z1] = self.max.0;
        [
            [x0, y0, z0],
            [x1, y0, z0],
            [x1, y1, z0],
            [x0, y1, z0],
            [x0, y0, z1],
            [x1, y0, z1],
            [x1, y1, z1],
            [x0, y1, z1],
        ]
        .map(|p| self.transform.of_point(Xyz(p)))
    }
}

/// A host world-aligned outline.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Outline {
    pub min: Xyz,
    pub max: Xyz,
}

/// A host polyline: vertices only, it is not a curve.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HostPolyLine(pub Vec<Xyz>);

/// A bound host line.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HostLine {
    pub start: Xyz,
    pub end: Xyz,
}

impl HostLine {
    /// A line bound between two points.
    ///
    /// Lines no longer than `short_curve_tolerance` are rejected.
    pub fn bound(start: Xyz, end: Xyz, short_curve_tolerance: f64) -> Result<Self> {
        let len = start.distance_to(end);
        if len <= short_curve_tolerance {
            return Err(Fault::invalid(format!(
                "line from {:?} to {:?} is too short ({})",
                start.0, end.0, len
            )));
        }
        Ok(Self { start, end })
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    pub fn direction(&self) -> Xyz {
        self.end.subtract(self.start).normalize()
    }
}

/// A host circular arc, counter-clockwise about `x_dir × y_dir` from `start_angle` to
/// `end_angle`.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HostArc {
    pub center: Xyz,
    pub radius: f64,
    pub x_dir: Xyz,
    pub y_dir: Xyz,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl HostArc {
    /// An arc on `plane`, centred at its origin.
    pub fn on_plane(
        plane: &HostPlane,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        short_curve_tolerance: f64,
    ) -> Result<Self> {
        if radius <= short_curve_tolerance {
            return Err(Fault::invalid(format!("arc radius {} is too small", radius)));
        }
        if end_angle <= start_angle {
            return Err(Fault::invalid(format!(
                "arc angles [{}, {}] are not increasing",
                start_angle, end_angle
            )));
        }
        Ok(Self {
            center: plane.origin,
            radius,
            x_dir: plane.x_vec,
            y_dir: plane.y_vec,
            start_angle,
            end_angle,
        })
    }

    /// An arc starting at `start`, passing through `mid`, ending at `end`.
    ///
    /// The arc is re-derived as the circumcircle of the three points.
    /// `x_dir` points to `start`, so the angle range is `[0, θ]`.
    pub fn through(start: Xyz, end: Xyz, mid: Xyz, short_curve_tolerance: f64) -> Result<Self> {
        let u = mid.subtract(start);
        let v = end.subtract(start);
        let w = u.cross(v);
        let ww = w.dot(w);

        // collinear, or coincident, measured by the sine between the chords
        let sine = ww.sqrt() / (u.length() * v.length());
        if !(sine > COLLINEAR_SINE) {
            return Err(Fault::invalid(format!(
                "arc points {:?}, {:?}, {:?} are collinear",
                start.0, mid.0, end.0
            )));
        }

        let c = v
            .multiply(u.dot(u))
            .subtract(u.multiply(v.dot(v)))
            .cross(w)
            .multiply(0.5 / ww);
        let center = start.add(c);
        let radius = c.length();
        if radius <= short_curve_tolerance {
            return Err(Fault::invalid(format!("arc radius {} is too small", radius)));
        }

        let normal = w.normalize();
        let x_dir = start.subtract(center).normalize();
        let y_dir = normal.cross(x_dir);

        let e = end.subtract(center);
        let mut end_angle = e.dot(y_dir).atan2(e.dot(x_dir));
        if end_angle <= 0.0 {
            end_angle += TAU;
        }

        Ok(Self {
            center,
            radius,
            x_dir,
            y_dir,
            start_angle: 0.0,
            end_angle,
        })
    }

    pub fn normal(&self) -> Xyz {
        self.x_dir.cross(self.y_dir)
    }

    pub fn is_closed(&self) -> bool {
        self.end_angle - self.start_angle >= TAU - 1e-10
    }

    pub fn point_at_angle(&self, angle: f64) -> Xyz {
        let (s, c) = angle.sin_cos();
        self.center
            .add(self.x_dir.multiply(self.radius * c))
            .add(self.y_dir.multiply(self.radius * s))
    }

    pub fn start_point(&self) -> Xyz {
        self.point_at_angle(self.start_angle)
    }

    pub fn end_point(&self) -> Xyz {
        self.point_at_angle(self.end_angle)
    }
}

/// A host elliptical arc.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HostEllipse {
    pub center: Xyz,
    pub radius_x: f64,
    pub radius_y: f64,
    pub x_dir: Xyz,
    pub y_dir: Xyz,
    pub start_param: f64,
    pub end_param: f64,
}

impl HostEllipse {
    pub fn point_at(&self, param: f64) -> Xyz {
        let (s, c) = param.sin_cos();
        self.center
            .add(self.x_dir.multiply(self.radius_x * c))
            .add(self.y_dir.multiply(self.radius_y * s))
    }

    pub fn start_point(&self) -> Xyz {
        self.point_at(self.start_param)
    }

    pub fn end_point(&self) -> Xyz {
        self.point_at(self.end_param)
    }
}

/// A host NURBS curve.
///
/// Built through [`HostNurbs::new`], which checks degree, weights, and knots, so evaluation
/// never indexes out of range.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawNurbs")]
pub struct HostNurbs {
    degree: usize,
    control_points: Vec<Xyz>,
    weights: Vec<f64>,
    knots: Vec<f64>,
}

#[derive(serde::Deserialize)]
struct RawNurbs {
    degree: usize,
    control_points: Vec<Xyz>,
    weights: Vec<f64>,
    knots: Vec<f64>,
}

impl TryFrom<RawNurbs> for HostNurbs {
    type Error = Fault;
    fn try_from(x: RawNurbs) -> Result<Self> {
        HostNurbs::new(x.degree, x.control_points, x.weights, x.knots)
    }
}

impl HostNurbs {
    pub fn new(
        degree: usize,
        control_points: Vec<Xyz>,
        weights: Vec<f64>,
        knots: Vec<f64>,
    ) -> Result<Self> {
        crate::nurbs::check(degree, control_points.len(), &weights, &knots)?;
        Ok(Self {
            degree,
            control_points,
            weights,
            knots,
        })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn control_points(&self) -> &[Xyz] {
        &self.control_points
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    pub fn is_rational(&self) -> bool {
        self.weights.windows(2).any(|w| w[0] != w[1])
    }

    pub fn domain(&self) -> Interval {
        Interval::new(self.knots[self.degree], self.knots[self.control_points.len()])
    }

    pub fn point_at(&self, t: f64) -> Xyz {
        let p = crate::nurbs::de_boor(self.degree, &self.knots, self.control_points.len(), t, |i| {
            (self.control_points[i].0, self.weights[i])
        });
        Xyz(p)
    }

    pub fn start_point(&self) -> Xyz {
        self.point_at(self.domain().t0)
    }

    pub fn end_point(&self) -> Xyz {
        self.point_at(self.domain().t1)
    }
}

/// A host curve.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum HostCurve {
    Line(HostLine),
    Arc(HostArc),
    Ellipse(HostEllipse),
    Nurbs(HostNurbs),
    /// Connected segments, never nested.
    Composite(Vec<HostCurve>),
}

impl HostCurve {
    pub fn start_point(&self) -> Xyz {
        match self {
            HostCurve::Line(x) => x.start,
            HostCurve::Arc(x) => x.start_point(),
            HostCurve::Ellipse(x) => x.start_point(),
            HostCurve::Nurbs(x) => x.start_point(),
            HostCurve::Composite(x) => x.first().map(HostCurve::start_point).unwrap_or_default(),
        }
    }

    pub fn end_point(&self) -> Xyz {
        match self {
            HostCurve::Line(x) => x.end,
            HostCurve::Arc(x) => x.end_point(),
            HostCurve::Ellipse(x) => x.end_point(),
            HostCurve::Nurbs(x) => x.end_point(),
            HostCurve::Composite(x) => x.last().map(HostCurve::end_point).unwrap_or_default(),
        }
    }

    /// The segments, a single element for non-composite curves.
    pub fn segments(&self) -> &[HostCurve] {
        match self {
            HostCurve::Composite(x) => x.as_slice(),
            x => std::slice::from_ref(x),
        }
    }
}

/// The host's unordered curve container, though order is kept.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurveArray(pub Vec<HostCurve>);

impl CurveArray {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn append(&mut self, curve: HostCurve) {
        self.0.push(curve)
    }
}

/// An array of [`CurveArray`]s, one per source curve.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurveArrArray(pub Vec<CurveArray>);

impl CurveArrArray {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn append(&mut self, array: CurveArray) {
        self.0.push(array)
    }
}

/// Curves joined end to end, in traversal order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurveLoop(Vec<HostCurve>);

impl CurveLoop {
    /// Each curve must start where the previous one ends, within `tolerance`.
    pub fn new(curves: Vec<HostCurve>, tolerance: f64) -> Result<Self> {
        if curves.is_empty() {
            return Err(Fault::invalid("curve loop has no curves"));
        }
        for (i, w) in curves.windows(2).enumerate() {
            let gap = w[0].end_point().distance_to(w[1].start_point());
            if gap > tolerance {
                return Err(Fault::invalid(format!(
                    "curve loop is not connected between curves {} and {} (gap {})",
                    i,
                    i + 1,
                    gap
                )));
            }
        }
        Ok(Self(curves))
    }

    pub fn curves(&self) -> &[HostCurve] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns if the last curve ends at the start of the first, within `tolerance`.
    pub fn is_closed(&self, tolerance: f64) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(a), Some(b)) => b.end_point().is_almost_equal_to(a.start_point(), tolerance),
            _ => false,
        }
    }
}
