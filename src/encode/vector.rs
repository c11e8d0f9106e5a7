//! Points, vectors, and planes.
use super::*;
use rayon::prelude::*;

impl Encode for Point2 {
    type Output = Uv;
    fn encode_with(&self, cx: &Context) -> Result<Uv> {
        scale2(*self, cx.factor).map(Uv)
    }
}

impl Encode for [f32; 2] {
    type Output = Uv;
    fn encode_with(&self, cx: &Context) -> Result<Uv> {
        self.map(f64::from).encode_with(cx)
    }
}

impl Encode for Point3 {
    type Output = Xyz;
    fn encode_with(&self, cx: &Context) -> Result<Xyz> {
        xyz(*self, cx)
    }
}

impl Encode for [f32; 3] {
    type Output = Xyz;
    fn encode_with(&self, cx: &Context) -> Result<Xyz> {
        self.map(f64::from).encode_with(cx)
    }
}

/// Vectors carry no unit: without an explicit context they are copied unscaled.
impl Encode for Vec2 {
    type Output = Uv;
    fn encode_with(&self, cx: &Context) -> Result<Uv> {
        scale2(self.0, cx.factor).map(Uv)
    }
    fn encode(&self) -> Result<Uv> {
        Ok(Uv(self.0))
    }
}

/// Vectors carry no unit: without an explicit context they are copied unscaled.
impl Encode for Vec3 {
    type Output = Xyz;
    fn encode_with(&self, cx: &Context) -> Result<Xyz> {
        scale3(self.0, cx.factor).map(Xyz)
    }
    fn encode(&self) -> Result<Xyz> {
        Ok(Xyz(self.0))
    }
}

/// The origin scales, the axes are copied.
///
/// Frames whose axes are not orthonormal are rejected.
impl Encode for Plane {
    type Output = HostPlane;
    fn encode_with(&self, cx: &Context) -> Result<HostPlane> {
        orthonormal(self)?;

        Ok(HostPlane {
            origin: xyz(self.origin, cx)?,
            x_vec: Xyz(self.x_axis.0),
            y_vec: Xyz(self.y_axis.0),
            normal: Xyz(self.normal().0),
        })
    }
}

pub fn encode_point(p: Point3, cx: &Context) -> Result<HostPoint> {
    xyz(p, cx).map(|coord| HostPoint { coord })
}

/// Encodes each point of a cloud, keeping order.
pub fn encode_point_cloud(points: &[Point3], cx: &Context) -> Result<Vec<HostPoint>> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| encode_point(*p, cx).map_err(|e| e.at(i)))
        .collect()
}

/// [`encode_point_cloud`] over the rayon pool.
pub fn encode_point_cloud_par(points: &[Point3], cx: &Context) -> Result<Vec<HostPoint>> {
    // results are gathered in index order before the first fault is picked
    points
        .par_iter()
        .enumerate()
        .map(|(i, p)| encode_point(*p, cx).map_err(|e| e.at(i)))
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}
