use crate::*;

/// A closed parameter interval `[t0, t1]`. `t0` may exceed `t1` for decreasing intervals.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Interval {
    pub t0: f64,
    pub t1: f64,
}

impl Interval {
    pub fn new(t0: f64, t1: f64) -> Self {
        Self { t0, t1 }
    }

    /// `[0, 2π]`
    pub fn full_turn() -> Self {
        Self::new(0.0, std::f64::consts::TAU)
    }

    pub fn min(&self) -> f64 {
        self.t0.min(self.t1)
    }

    pub fn max(&self) -> f64 {
        self.t0.max(self.t1)
    }

    /// Signed length, `t1 - t0`.
    pub fn length(&self) -> f64 {
        self.t1 - self.t0
    }

    pub fn mid(&self) -> f64 {
        (self.t0 + self.t1) * 0.5
    }

    pub fn is_increasing(&self) -> bool {
        self.t1 > self.t0
    }
}

/// An axis-aligned bounding box.
///
/// A box is _valid_ when `min <= max` componentwise and both corners are finite.
/// [`BoundingBox::EMPTY`] is the canonical invalid box.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    pub min: Point3,
    pub max: Point3,
}

impl BoundingBox {
    pub const EMPTY: BoundingBox = BoundingBox {
        min: [1.0, 0.0, 0.0],
        max: [-1.0, 0.0, 0.0],
    };

    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min.into_iter().zip(self.max).all(|(a, b)| a <= b)
    }

    /// Returns if the box is valid and has no extent in some dimension.
    pub fn is_degenerate(&self) -> bool {
        self.is_valid() && self.min.into_iter().zip(self.max).any(|(a, b)| a == b)
    }
}

impl FromIterator<Point3> for BoundingBox {
    /// The tightest box around the points, [`BoundingBox::EMPTY`] when there are none.
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Point3>,
    {
        let mut iter = iter.into_iter();
        let Some(init) = iter.next() else {
            return Self::EMPTY;
        };

        let (min, max) = iter.fold((init, init), |(min, max), p| {
            (min.min_all(p), max.max_all(p))
        });

        Self::new(min, max)
    }
}

/// An oriented box: extents along the axes of a reference plane.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Box3 {
    pub plane: Plane,
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Box3 {
    pub fn new(plane: Plane, x: Interval, y: Interval, z: Interval) -> Self {
        Self { plane, x, y, z }
    }

    pub fn is_valid(&self) -> bool {
        self.plane.is_orthonormal()
            && [self.x, self.y, self.z]
                .iter()
                .all(|i| i.t0.is_finite() && i.t1.is_finite())
    }

    /// Corners in the plane's local frame.
    pub fn local_corners(&self) -> [Point3; 8] {
        let [x0, x1] = [self.x.min(), self.x.max()];
        let [y0, y1] = [self.y.min(), self.y.max()];
        let [z0, z1] = [self.z.min(), self.z.max()];
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
    }

    /// Corners in world coordinates.
    pub fn corners(&self) -> [Point3; 8] {
        self.local_corners().map(|p| self.plane.point_at_local(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_validity() {
        assert!(BoundingBox::new([0.0; 3], [1.0; 3]).is_valid());
        assert!(!BoundingBox::EMPTY.is_valid());
        assert!(!BoundingBox::new([0.0; 3], [f64::NAN, 1.0, 1.0]).is_valid());
        assert!(BoundingBox::new([0.0; 3], [1.0, 0.0, 1.0]).is_degenerate());
    }

    #[test]
    fn box_from_points() {
        let b = BoundingBox::from_iter([[1.0, -1.0, 2.0], [-3.0, 4.0, 0.0], [0.0, 0.0, 9.0]]);
        assert_eq!(b.min, [-3.0, -1.0, 0.0]);
        assert_eq!(b.max, [1.0, 4.0, 9.0]);
        assert_eq!(BoundingBox::from_iter(std::iter::empty()), BoundingBox::EMPTY);
    }

    #[test]
    fn oriented_corners() {
        let plane = Plane::new([1.0, 1.0, 1.0], Vec3::Y, Vec3([-1.0, 0.0, 0.0]));
        let b = Box3::new(
            plane,
            Interval::new(2.0, 0.0),
            Interval::new(0.0, 1.0),
            Interval::new(0.0, 3.0),
        );
        assert!(b.is_valid());
        let c = b.corners();
        assert_eq!(c[0], [1.0, 1.0, 1.0]);
        assert_eq!(c[1], [1.0, 3.0, 1.0]);
        assert_eq!(c[6], [0.0, 3.0, 4.0]);
    }

    #[test]
    fn interval_measures() {
        let i = Interval::new(3.0, 1.0);
        assert_eq!(i.min(), 1.0);
        assert_eq!(i.length(), -2.0);
        assert!(!i.is_increasing());
        assert_eq!(Interval::full_turn().mid(), std::f64::consts::PI);
    }
}
