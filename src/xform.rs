use crate::*;

const AFFINE_TOL: f64 = 1e-12;

/// A 4x4 transformation matrix, row-major: `m[row][col]`.
///
/// Points are column vectors, so the translation is column 3 and basis X/Y/Z are columns 0/1/2.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform(pub [[f64; 4]; 4]);

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn translation([x, y, z]: Point3) -> Self {
        let mut t = Self::identity();
        t.0[0][3] = x;
        t.0[1][3] = y;
        t.0[2][3] = z;
        t
    }

    /// Build an affine transform from its columns.
    pub fn from_basis(origin: Point3, x: Vec3, y: Vec3, z: Vec3) -> Self {
        let mut m = Self::identity().0;
        for (col, v) in [x.0, y.0, z.0, origin].into_iter().enumerate() {
            for (row, f) in v.into_iter().enumerate() {
                m[row][col] = f;
            }
        }
        Self(m)
    }

    /// Maps plane `from` onto plane `to`.
    ///
    /// Both frames are expected to be orthonormal so `from`'s inverse is its transpose.
    pub fn plane_to_plane(from: &Plane, to: &Plane) -> Self {
        let f = [from.x_axis, from.y_axis, from.normal()];
        let t = [to.x_axis, to.y_axis, to.normal()];

        // linear part is T * F^T
        let mut m = Self::identity().0;
        for (r, row) in m.iter_mut().enumerate().take(3) {
            for (c, cell) in row.iter_mut().enumerate().take(3) {
                *cell = (0..3).map(|k| t[k].0[r] * f[k].0[c]).sum();
            }
        }

        let o = Self(m).apply_vector(from.origin);
        let d = to.origin.sub(o);
        m[0][3] = d[0];
        m[1][3] = d[1];
        m[2][3] = d[2];
        Self(m)
    }

    pub fn bottom_row(&self) -> [f64; 4] {
        self.0[3]
    }

    /// Returns if the bottom row is `[0, 0, 0, 1]`.
    pub fn is_affine(&self) -> bool {
        let [a, b, c, d] = self.bottom_row();
        a.abs() <= AFFINE_TOL
            && b.abs() <= AFFINE_TOL
            && c.abs() <= AFFINE_TOL
            && (d - 1.0).abs() <= AFFINE_TOL
    }

    pub fn column(&self, col: usize) -> Point3 {
        [self.0[0][col], self.0[1][col], self.0[2][col]]
    }

    /// Transform a point, ignoring the projective row.
    pub fn apply_point(&self, p: Point3) -> Point3 {
        self.apply_vector(p).add(self.column(3))
    }

    /// Transform a vector, translation does not apply.
    pub fn apply_vector(&self, [x, y, z]: Point3) -> Point3 {
        self.column(0)
            .scale(x)
            .add(self.column(1).scale(y))
            .add(self.column(2).scale(z))
    }

    /// `self * rhs`, so `rhs` applies first.
    pub fn then(&self, rhs: &Transform) -> Self {
        let mut m = [[0.0; 4]; 4];
        for (r, row) in m.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.0[r][k] * rhs.0[k][c]).sum();
            }
        }
        Self(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn same(a: Point3, b: Point3) -> bool {
        dist(a, b) < 1e-11
    }

    #[test]
    fn affine_detection() {
        assert!(Transform::identity().is_affine());
        assert!(Transform::translation([1.0, 2.0, 3.0]).is_affine());

        let mut t = Transform::identity();
        t.0[3][1] = 0.5;
        assert!(!t.is_affine());

        let mut t = Transform::identity();
        t.0[3][3] = 2.0;
        assert!(!t.is_affine());
    }

    #[test]
    fn from_basis_columns() {
        let t = Transform::from_basis([4.0, 5.0, 6.0], Vec3::Y, Vec3([-1.0, 0.0, 0.0]), Vec3::Z);
        assert_eq!(t.column(0), [0.0, 1.0, 0.0]);
        assert_eq!(t.column(3), [4.0, 5.0, 6.0]);
        assert!(same(t.apply_point([1.0, 0.0, 0.0]), [4.0, 6.0, 6.0]));
        assert!(same(t.apply_vector([1.0, 0.0, 0.0]), [0.0, 1.0, 0.0]));
    }

    #[test]
    fn plane_to_plane_maps_frames() {
        let h = 0.5f64.sqrt();
        let to = Plane::new([10.0, 0.0, -2.0], Vec3([h, h, 0.0]), Vec3([0.0, 0.0, 1.0]));
        let t = Transform::plane_to_plane(&Plane::world_xy(), &to);
        assert!(t.is_affine());
        assert!(same(t.apply_point([0.0; 3]), to.origin));
        assert!(same(t.apply_point([1.0, 2.0, 3.0]), to.point_at_local([1.0, 2.0, 3.0])));

        // and back again
        let back = Transform::plane_to_plane(&to, &Plane::world_xy());
        let p = [0.3, -7.0, 2.0];
        assert!(same(back.apply_point(t.apply_point(p)), p));
    }

    #[test]
    fn composition_order() {
        let a = Transform::translation([1.0, 0.0, 0.0]);
        let b = Transform::from_basis([0.0; 3], Vec3::Y, Vec3([-1.0, 0.0, 0.0]), Vec3::Z);
        // rotate first, then translate
        let t = a.then(&b);
        assert!(same(t.apply_point([1.0, 0.0, 0.0]), [1.0, 1.0, 0.0]));
    }
}
