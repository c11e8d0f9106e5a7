//! Bounding volumes.
use super::*;

/// Min and max scale independently; `enabled` is the source box validity.
impl Encode for BoundingBox {
    type Output = BoundingBoxXyz;
    fn encode_with(&self, cx: &Context) -> Result<BoundingBoxXyz> {
        Ok(BoundingBoxXyz {
            transform: HostTransform::identity(),
            min: xyz(self.min, cx)?,
            max: xyz(self.max, cx)?,
            enabled: self.is_valid(),
        })
    }
}

/// The box frame becomes the host transform, extents scale in that frame.
impl Encode for Box3 {
    type Output = BoundingBoxXyz;
    fn encode_with(&self, cx: &Context) -> Result<BoundingBoxXyz> {
        if !self.plane.is_orthonormal() {
            return Err(Fault::invalid(format!(
                "box plane axes {:?} and {:?} are not orthonormal",
                self.plane.x_axis.0, self.plane.y_axis.0
            )));
        }

        let transform = Transform::plane_to_plane(&Plane::world_xy(), &self.plane).encode_with(cx)?;
        let min = [self.x.min(), self.y.min(), self.z.min()];
        let max = [self.x.max(), self.y.max(), self.z.max()];

        Ok(BoundingBoxXyz {
            transform,
            min: xyz(min, cx)?,
            max: xyz(max, cx)?,
            enabled: self.is_valid(),
        })
    }
}

/// A world aligned host outline.
pub fn encode_outline(bbox: &BoundingBox, cx: &Context) -> Result<Outline> {
    Ok(Outline {
        min: xyz(bbox.min, cx)?,
        max: xyz(bbox.max, cx)?,
    })
}
