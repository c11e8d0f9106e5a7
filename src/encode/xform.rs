//! Transforms.
use super::*;

/// Decomposes an affine transform into origin and basis.
///
/// The translation column scales, the basis columns are copied as is: scale, shear, and
/// reflections of the source survive.
impl Encode for Transform {
    type Output = HostTransform;
    fn encode_with(&self, cx: &Context) -> Result<HostTransform> {
        if !self.is_affine() {
            let bottom_row = self.bottom_row();
            log::warn!("transform bottom row {:?} is not affine", bottom_row);
            return Err(Fault::NonAffineTransform { bottom_row });
        }

        let t = HostTransform {
            origin: xyz(self.column(3), cx)?,
            basis_x: Xyz(self.column(0)),
            basis_y: Xyz(self.column(1)),
            basis_z: Xyz(self.column(2)),
        };
        log::trace!("encoded transform with scale {}", t.scale());
        Ok(t)
    }
}
