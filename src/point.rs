use std::ops;

/// Coordinate tuple arithmetic shared by source points and vectors.
pub trait Point: Copy + Sized + IntoIterator<Item = f64> {
    /// Set all the values to this value.
    fn all(v: f64) -> Self;

    /// Set all values to zero.
    fn zero() -> Self {
        Self::all(0.)
    }

    /// Scale point by multiplying all dimensions by `scalar`.
    fn scale(self, scalar: f64) -> Self;

    /// Calculate the magnitude of the vector.
    fn mag(self) -> f64 {
        self.into_iter().map(|a| a * a).sum::<f64>().sqrt()
    }

    /// Normalise the vector by the magnitude.
    fn unit(self) -> Self {
        self.scale(self.mag().recip())
    }

    /// Return the minimum of each dimension.
    fn min_all(self, b: Self) -> Self {
        Self::xfm(self, b, f64::min)
    }

    /// Return the maximum of each dimension.
    fn max_all(self, b: Self) -> Self {
        Self::xfm(self, b, f64::max)
    }

    /// Returns if every dimension is finite.
    fn is_finite(self) -> bool {
        self.into_iter().all(f64::is_finite)
    }

    /// Perform a transformation on each pair of dimensions.
    fn xfm<F: Fn(f64, f64) -> f64>(self, b: Self, f: F) -> Self;
}

pub trait Add<Rhs = Self> {
    fn add(self, rhs: Rhs) -> Self;
    fn sub(self, rhs: Rhs) -> Self;
}

/// 2D Point (X,Y).
pub type Point2 = [f64; 2];

/// 3D Point (X,Y,Z).
pub type Point3 = [f64; 3];

impl Point for Point2 {
    fn all(v: f64) -> Self {
        [v; 2]
    }
    fn scale(self, scalar: f64) -> Self {
        self.map(|f| f * scalar)
    }
    fn xfm<F: Fn(f64, f64) -> f64>(self, [bx, by]: Self, f: F) -> Self {
        let [ax, ay] = self;
        [f(ax, bx), f(ay, by)]
    }
}

impl Point for Point3 {
    fn all(v: f64) -> Self {
        [v; 3]
    }
    fn scale(self, scalar: f64) -> Self {
        self.map(|f| f * scalar)
    }
    fn xfm<F: Fn(f64, f64) -> f64>(self, [bx, by, bz]: Self, f: F) -> Self {
        let [ax, ay, az] = self;
        [f(ax, bx), f(ay, by), f(az, bz)]
    }
}

impl Add for Point2 {
    fn add(self, rhs: Self) -> Self {
        self.xfm(rhs, ops::Add::add)
    }
    fn sub(self, rhs: Self) -> Self {
        self.xfm(rhs, ops::Sub::sub)
    }
}

impl Add for Point3 {
    fn add(self, rhs: Self) -> Self {
        self.xfm(rhs, ops::Add::add)
    }
    fn sub(self, rhs: Self) -> Self {
        self.xfm(rhs, ops::Sub::sub)
    }
}

/// A 2D direction or displacement.
///
/// Unlike a [`Point2`] a vector carries no unit, so it is only rescaled when a factor is given
/// explicitly.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec2(pub Point2);

/// A 3D direction or displacement.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec3(pub Point3);

impl Vec3 {
    pub const X: Vec3 = Vec3([1.0, 0.0, 0.0]);
    pub const Y: Vec3 = Vec3([0.0, 1.0, 0.0]);
    pub const Z: Vec3 = Vec3([0.0, 0.0, 1.0]);

    pub fn len(self) -> f64 {
        self.0.mag()
    }

    pub fn dot(self, rhs: Vec3) -> f64 {
        dot_prod(self.0, rhs.0)
    }

    pub fn cross(self, rhs: Vec3) -> Vec3 {
        Vec3(xprod(self.0, rhs.0))
    }
}

pub fn dot_prod(a: Point3, b: Point3) -> f64 {
    a.into_iter().zip(b).map(|(a, b)| a * b).sum()
}

#[allow(clippy::many_single_char_names)]
pub fn xprod(a: Point3, b: Point3) -> Point3 {
    let [ax, ay, az] = a;
    let [bx, by, bz] = b;
    let x = ay * bz - az * by;
    let y = az * bx - ax * bz;
    let z = ax * by - ay * bx;
    [x, y, z]
}

/// Distance between two points.
pub fn dist<P: Point + Add>(a: P, b: P) -> f64 {
    a.sub(b).mag()
}
