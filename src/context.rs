//! Conversion settings.
use crate::*;
use std::sync::OnceLock;

static DEFAULT: OnceLock<Context> = OnceLock::new();

/// Linear units a model can be authored in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Millimeters,
    Centimeters,
    Meters,
    Inches,
    Feet,
}

impl LengthUnit {
    /// Size of one unit, in meters.
    pub fn meters(self) -> f64 {
        use LengthUnit::*;
        match self {
            Millimeters => 0.001,
            Centimeters => 0.01,
            Meters => 1.0,
            Inches => 0.0254,
            Feet => 0.3048,
        }
    }
}

/// The settings every encoding runs under.
///
/// `factor` converts source model units into host internal units; it is applied to every
/// position and length, never to directions, weights, knots, or angles.
/// Tolerances are in **host** units.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Context {
    pub factor: f64,
    /// Host curves shorter than this are degenerate.
    pub short_curve_tolerance: f64,
    /// Endpoints closer than this are coincident.
    pub vertex_tolerance: f64,
    /// Angular tolerance (radians).
    pub angle_tolerance: f64,
    /// Run the short segment pre-pass before segmenting polylines.
    pub delete_short_segments: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            factor: 1.0,
            short_curve_tolerance: 1.0 / 256.0,
            vertex_tolerance: 1.0 / 1024.0,
            angle_tolerance: 1e-10,
            delete_short_segments: true,
        }
    }
}

impl Context {
    /// A default context with the given unit factor.
    pub fn new(factor: f64) -> Result<Self> {
        Self::default().with_factor(factor)
    }

    /// The factor converting `source` model units into `host` units.
    ///
    /// ```rust
    /// # use geom_encode::*;
    /// let cx = Context::from_units(LengthUnit::Feet, LengthUnit::Inches);
    /// assert!((cx.factor - 12.0).abs() < 1e-12);
    /// ```
    pub fn from_units(source: LengthUnit, host: LengthUnit) -> Self {
        let factor = if source == host {
            1.0
        } else {
            source.meters() / host.meters()
        };
        Self {
            factor,
            ..Self::default()
        }
    }

    /// Replace the factor, keeping the tolerances.
    pub fn with_factor(self, factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(Fault::InvalidFactor(factor));
        }
        Ok(Self { factor, ..self })
    }

    /// Checks the factor and tolerances of a deserialized context.
    pub fn validate(&self) -> Result<()> {
        self.with_factor(self.factor)?;
        let tols = [
            self.short_curve_tolerance,
            self.vertex_tolerance,
            self.angle_tolerance,
        ];
        if tols.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(Fault::invalid("tolerances must be finite and non-negative"));
        }
        Ok(())
    }

    /// Returns if no scaling takes place.
    #[allow(clippy::float_cmp)]
    pub fn is_identity(&self) -> bool {
        self.factor == 1.0
    }

    /// The short curve tolerance expressed in source units.
    pub fn source_short_curve_tolerance(&self) -> f64 {
        self.short_curve_tolerance / self.factor
    }

    /// Establish the process-wide default context.
    ///
    /// This can only happen **once**, normally while the host application reads its model
    /// units. A second call hands the rejected context back.
    pub fn install(self) -> std::result::Result<(), Context> {
        if self.validate().is_err() {
            return Err(self);
        }
        DEFAULT.set(self)
    }

    /// The process-wide default, [`Context::default`] if none was installed.
    pub fn global() -> &'static Context {
        DEFAULT.get_or_init(Context::default)
    }
}
