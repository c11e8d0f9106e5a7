//! Non-uniform rational B-splines.
use crate::*;

/// A NURBS curve.
///
/// The knot vector is the _full_ vector, `points + degree + 1` long, non-decreasing.
/// Weights are strictly positive, one per control point.
/// Control points carry length units, weights and knots do not.
#[derive(Clone, Debug, PartialEq)]
pub struct NurbsCurve {
    degree: usize,
    points: Vec<Point3>,
    weights: Vec<f64>,
    knots: Vec<f64>,
}

impl NurbsCurve {
    pub fn new(
        degree: usize,
        points: Vec<Point3>,
        weights: Vec<f64>,
        knots: Vec<f64>,
    ) -> Result<Self> {
        check(degree, points.len(), &weights, &knots)?;
        Ok(Self {
            degree,
            points,
            weights,
            knots,
        })
    }

    /// A non-rational curve, all weights 1.
    pub fn non_rational(degree: usize, points: Vec<Point3>, knots: Vec<f64>) -> Result<Self> {
        let weights = vec![1.0; points.len()];
        Self::new(degree, points, weights, knots)
    }

    /// A non-rational curve over a clamped, uniform knot vector on `[0, 1]`.
    ///
    /// ```rust
    /// # use geom_encode::*;
    /// let c = NurbsCurve::clamped(2, vec![[0.0; 3], [1.0, 1.0, 0.0], [2.0, 0.0, 0.0]]).unwrap();
    /// assert_eq!(c.knots(), &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
    /// ```
    pub fn clamped(degree: usize, points: Vec<Point3>) -> Result<Self> {
        let knots = clamped_knots(degree, points.len());
        Self::non_rational(degree, points, knots)
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
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
        Interval::new(self.knots[self.degree], self.knots[self.points.len()])
    }

    pub fn point_at(&self, t: f64) -> Point3 {
        de_boor(self.degree, &self.knots, self.points.len(), t, |i| {
            (self.points[i], self.weights[i])
        })
    }

    pub fn start(&self) -> Point3 {
        self.point_at(self.domain().t0)
    }

    pub fn end(&self) -> Point3 {
        self.point_at(self.domain().t1)
    }
}

pub(crate) fn check(degree: usize, count: usize, weights: &[f64], knots: &[f64]) -> Result<()> {
    if degree == 0 {
        return Err(Fault::invalid("nurbs degree must be at least 1"));
    }
    if count <= degree {
        return Err(Fault::invalid(format!(
            "nurbs of degree {} needs more than {} control points, has {}",
            degree, degree, count
        )));
    }
    if weights.len() != count {
        return Err(Fault::invalid(format!(
            "nurbs has {} weights for {} control points",
            weights.len(),
            count
        )));
    }
    if weights.iter().any(|w| !w.is_finite() || *w <= 0.0) {
        return Err(Fault::invalid("nurbs weights must be finite and positive"));
    }
    if knots.len() != count + degree + 1 {
        return Err(Fault::invalid(format!(
            "nurbs expects {} knots, has {}",
            count + degree + 1,
            knots.len()
        )));
    }
    if knots.iter().any(|k| !k.is_finite()) || knots.windows(2).any(|w| w[1] < w[0]) {
        return Err(Fault::invalid("nurbs knots must be finite and non-decreasing"));
    }
    if knots[count] <= knots[degree] {
        return Err(Fault::invalid("nurbs domain is empty"));
    }
    Ok(())
}

/// A clamped uniform knot vector over `[0, 1]`.
pub fn clamped_knots(degree: usize, count: usize) -> Vec<f64> {
    let spans = count.saturating_sub(degree).max(1);
    let inner = (1..spans).map(|i| i as f64 / spans as f64);
    std::iter::repeat(0.0)
        .take(degree + 1)
        .chain(inner)
        .chain(std::iter::repeat(1.0).take(degree + 1))
        .collect()
}

/// Evaluates a rational B-spline with de Boor's algorithm in homogeneous coordinates.
///
/// `cv(i)` returns the `i`th control point and weight. `t` is clamped to the domain.
pub(crate) fn de_boor<F>(degree: usize, knots: &[f64], count: usize, t: f64, cv: F) -> Point3
where
    F: Fn(usize) -> (Point3, f64),
{
    let p = degree;
    let t = t.clamp(knots[p], knots[count]);

    // span k such that knots[k] <= t < knots[k + 1]
    let mut k = p;
    while k < count - 1 && knots[k + 1] <= t {
        k += 1;
    }

    let mut d = (0..=p)
        .map(|j| {
            let ([x, y, z], w) = cv(j + k - p);
            [x * w, y * w, z * w, w]
        })
        .collect::<Vec<_>>();

    for r in 1..=p {
        for j in (r..=p).rev() {
            let i = j + k - p;
            let span = knots[i + p + 1 - r] - knots[i];
            let a = if span == 0.0 { 0.0 } else { (t - knots[i]) / span };
            for c in 0..4 {
                d[j][c] = (1.0 - a) * d[j - 1][c] + a * d[j][c];
            }
        }
    }

    let [x, y, z, w] = d[p];
    [x / w, y / w, z / w]
}
