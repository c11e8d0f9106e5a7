use crate::*;

const ORTHONORMAL_TOL: f64 = 1e-9;

/// A plane frame: an origin and two orthonormal axes.
///
/// The normal is derived as `x_axis × y_axis`.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Plane {
    pub origin: Point3,
    pub x_axis: Vec3,
    pub y_axis: Vec3,
}

impl Plane {
    pub fn new(origin: Point3, x_axis: Vec3, y_axis: Vec3) -> Self {
        Self {
            origin,
            x_axis,
            y_axis,
        }
    }

    /// The world XY plane at the origin.
    pub fn world_xy() -> Self {
        Self::new(Point3::zero(), Vec3::X, Vec3::Y)
    }

    pub fn normal(&self) -> Vec3 {
        self.x_axis.cross(self.y_axis)
    }

    /// Returns if both axes are unit length and mutually orthogonal.
    pub fn is_orthonormal(&self) -> bool {
        (self.x_axis.len() - 1.0).abs() <= ORTHONORMAL_TOL
            && (self.y_axis.len() - 1.0).abs() <= ORTHONORMAL_TOL
            && self.x_axis.dot(self.y_axis).abs() <= ORTHONORMAL_TOL
    }

    /// The world location of plane coordinates `(u, v)`.
    pub fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.origin
            .add(self.x_axis.0.scale(u))
            .add(self.y_axis.0.scale(v))
    }

    /// The world location of local frame coordinates `(x, y, z)`, `z` along the normal.
    pub fn point_at_local(&self, [x, y, z]: Point3) -> Point3 {
        self.point_at(x, y).add(self.normal().0.scale(z))
    }
}
