//! Faults raised while encoding geometry.
use thiserror::Error;

/// A conversion fault.
///
/// Faults are deterministic: the same input and [`Context`](crate::Context) always yield the
/// same fault, so they should never be retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Fault {
    /// The transform's bottom row is not `[0, 0, 0, 1]`.
    #[error("transform is not affine, bottom row is {bottom_row:?}")]
    NonAffineTransform { bottom_row: [f64; 4] },

    /// Degenerate or self-contradictory source geometry.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A curve kind with neither a direct nor a NURBS mapping.
    #[error("unsupported curve variant: {0}")]
    UnsupportedVariant(String),

    /// A finite coordinate became non-finite once scaled.
    #[error("scaling {value} by {factor} overflows")]
    NumericOverflow { value: f64, factor: f64 },

    /// The unit factor is not a finite, positive number.
    #[error("unit factor {0} must be finite and positive")]
    InvalidFactor(f64),

    /// An element of an aggregate failed to encode.
    #[error("element {index}: {fault}")]
    Element {
        index: usize,
        #[source]
        fault: Box<Fault>,
    },
}

impl Fault {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        log::warn!("rejecting geometry: {}", msg);
        Fault::InvalidGeometry(msg)
    }

    pub(crate) fn at(self, index: usize) -> Self {
        Fault::Element {
            index,
            fault: Box::new(self),
        }
    }

    /// The innermost fault, unwrapping any [`Fault::Element`] layers.
    pub fn root(&self) -> &Fault {
        match self {
            Fault::Element { fault, .. } => fault.root(),
            x => x,
        }
    }

    /// The indices of nested [`Fault::Element`] layers, outermost first.
    ///
    /// ```rust
    /// # use geom_encode::*;
    /// let f = Fault::Element {
    ///     index: 1,
    ///     fault: Box::new(Fault::Element {
    ///         index: 4,
    ///         fault: Box::new(Fault::InvalidGeometry("zero length".into())),
    ///     }),
    /// };
    /// assert_eq!(f.index_path(), vec![1, 4]);
    /// ```
    pub fn index_path(&self) -> Vec<usize> {
        let mut path = Vec::new();
        let mut f = self;
        while let Fault::Element { index, fault } = f {
            path.push(*index);
            f = fault;
        }
        path
    }

    /// Returns if the root fault is [`Fault::InvalidGeometry`].
    pub fn is_invalid_geometry(&self) -> bool {
        matches!(self.root(), Fault::InvalidGeometry(_))
    }
}

pub type Result<T> = std::result::Result<T, Fault>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_unwraps_elements() {
        let f = Fault::invalid("x").at(3).at(0);
        assert_eq!(f.index_path(), vec![0, 3]);
        assert_eq!(f.root(), &Fault::InvalidGeometry("x".into()));
        assert!(f.is_invalid_geometry());
        assert!(!Fault::InvalidFactor(0.0).is_invalid_geometry());
    }

    #[test]
    fn display_includes_index() {
        let f = Fault::invalid("zero length line").at(2);
        assert_eq!(f.to_string(), "element 2: invalid geometry: zero length line");
    }
}
