//! Source kernel curves.
use crate::*;
use std::{f64::consts::TAU, fmt, sync::Arc as Shared};

/// A bounded line segment.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Line {
    pub from: Point3,
    pub to: Point3,
}

impl Line {
    pub fn new(from: Point3, to: Point3) -> Self {
        Self { from, to }
    }

    pub fn length(&self) -> f64 {
        dist(self.from, self.to)
    }
}

/// A circle on a plane, centred at the plane origin.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Circle {
    pub plane: Plane,
    pub radius: f64,
}

impl Circle {
    pub fn new(plane: Plane, radius: f64) -> Self {
        Self { plane, radius }
    }

    /// The point at `angle` radians from the plane's X axis.
    pub fn point_at(&self, angle: f64) -> Point3 {
        let (s, c) = angle.sin_cos();
        self.plane.point_at(self.radius * c, self.radius * s)
    }
}

/// A circular arc: a [`Circle`] limited to an angle interval.
///
/// The interval may be decreasing, in which case the arc runs clockwise about the plane
/// normal.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Arc {
    pub plane: Plane,
    pub radius: f64,
    pub angle: Interval,
}

impl Arc {
    pub fn new(plane: Plane, radius: f64, angle: Interval) -> Self {
        Self {
            plane,
            radius,
            angle,
        }
    }

    fn circle(&self) -> Circle {
        Circle::new(self.plane, self.radius)
    }

    /// Returns if the arc sweeps a full turn, within `angle_tolerance`.
    pub fn is_circle(&self, angle_tolerance: f64) -> bool {
        self.angle.length().abs() >= TAU - angle_tolerance
    }

    pub fn start(&self) -> Point3 {
        self.circle().point_at(self.angle.t0)
    }

    pub fn end(&self) -> Point3 {
        self.circle().point_at(self.angle.t1)
    }

    pub fn mid(&self) -> Point3 {
        self.circle().point_at(self.angle.mid())
    }
}

impl From<Circle> for Arc {
    fn from(c: Circle) -> Self {
        Arc::new(c.plane, c.radius, Interval::full_turn())
    }
}

/// An ellipse on a plane, limited to an angle interval.
///
/// `radius1` lies along the plane's X axis, `radius2` along its Y axis.
/// The angle is the ellipse's parameter, `origin + r1·cos(t)·X + r2·sin(t)·Y`.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ellipse {
    pub plane: Plane,
    pub radius1: f64,
    pub radius2: f64,
    pub angle: Interval,
}

impl Ellipse {
    /// A closed ellipse.
    pub fn new(plane: Plane, radius1: f64, radius2: f64) -> Self {
        Self::with_interval(plane, radius1, radius2, Interval::full_turn())
    }

    pub fn with_interval(plane: Plane, radius1: f64, radius2: f64, angle: Interval) -> Self {
        Self {
            plane,
            radius1,
            radius2,
            angle,
        }
    }

    pub fn point_at(&self, angle: f64) -> Point3 {
        let (s, c) = angle.sin_cos();
        self.plane.point_at(self.radius1 * c, self.radius2 * s)
    }
}

/// A curve kind this crate has no direct mapping for.
///
/// Such curves are encoded through their NURBS form. Returning `None` from
/// [`NurbsForm::to_nurbs`] makes the curve unsupported.
pub trait NurbsForm: fmt::Debug + Send + Sync {
    /// A short description of the curve kind, used in faults.
    fn kind(&self) -> String;

    /// The NURBS approximation of the curve, in source units.
    fn to_nurbs(&self) -> Option<NurbsCurve>;
}

/// The source kernel's curve variants.
#[derive(Clone, Debug)]
pub enum Curve {
    Line(Line),
    Polyline(Polyline3),
    Arc(Arc),
    Circle(Circle),
    Ellipse(Ellipse),
    Nurbs(NurbsCurve),
    /// Segments joined end to end.
    Composite(Vec<Curve>),
    /// Anything else, mapped through its NURBS form.
    Other(Shared<dyn NurbsForm>),
}

impl Curve {
    pub fn other<T: NurbsForm + 'static>(curve: T) -> Self {
        Curve::Other(Shared::new(curve))
    }

    /// A short name for the variant.
    pub fn kind(&self) -> String {
        match self {
            Curve::Line(_) => "line".into(),
            Curve::Polyline(_) => "polyline".into(),
            Curve::Arc(_) => "arc".into(),
            Curve::Circle(_) => "circle".into(),
            Curve::Ellipse(_) => "ellipse".into(),
            Curve::Nurbs(_) => "nurbs".into(),
            Curve::Composite(_) => "composite".into(),
            Curve::Other(x) => x.kind(),
        }
    }

    /// The start and end points, `None` for empty curves or unsupported kinds.
    pub fn endpoints(&self) -> Option<(Point3, Point3)> {
        match self {
            Curve::Line(l) => Some((l.from, l.to)),
            Curve::Polyline(p) => p.first().zip(p.last()),
            Curve::Arc(a) => Some((a.start(), a.end())),
            Curve::Circle(c) => {
                let p = c.point_at(0.0);
                Some((p, p))
            }
            Curve::Ellipse(e) => Some((e.point_at(e.angle.t0), e.point_at(e.angle.t1))),
            Curve::Nurbs(n) => Some((n.start(), n.end())),
            Curve::Composite(segs) => {
                let (s, _) = segs.first()?.endpoints()?;
                let (_, e) = segs.last()?.endpoints()?;
                Some((s, e))
            }
            Curve::Other(x) => x.to_nurbs().map(|n| (n.start(), n.end())),
        }
    }
}

impl From<Line> for Curve {
    fn from(x: Line) -> Self {
        Curve::Line(x)
    }
}

impl From<Polyline3> for Curve {
    fn from(x: Polyline3) -> Self {
        Curve::Polyline(x)
    }
}

impl From<Arc> for Curve {
    fn from(x: Arc) -> Self {
        Curve::Arc(x)
    }
}

impl From<Circle> for Curve {
    fn from(x: Circle) -> Self {
        Curve::Circle(x)
    }
}

impl From<Ellipse> for Curve {
    fn from(x: Ellipse) -> Self {
        Curve::Ellipse(x)
    }
}

impl From<NurbsCurve> for Curve {
    fn from(x: NurbsCurve) -> Self {
        Curve::Nurbs(x)
    }
}
