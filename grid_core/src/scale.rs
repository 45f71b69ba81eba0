use serde::Serialize;

/// Square-root radius scale for bubble markers.
///
/// Bubble *area* grows linearly with magnitude: `radius = max_radius *
/// sqrt(m / domain_max)`. The domain is `[0, domain_max]`, fixed when the
/// scale is built; inputs outside it are clamped so the output always lies in
/// `[0, max_radius]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadiusScale {
    domain_max: f64,
    max_radius: f64,
}

impl RadiusScale {
    /// A scale that maps every magnitude to zero.
    pub const fn degenerate(max_radius: f64) -> Self {
        Self {
            domain_max: 0.0,
            max_radius,
        }
    }

    pub fn domain_max(&self) -> f64 {
        self.domain_max
    }

    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    pub fn is_degenerate(&self) -> bool {
        self.domain_max <= 0.0
    }

    pub fn radius(&self, magnitude: f64) -> f64 {
        if self.is_degenerate() || self.max_radius <= 0.0 || magnitude.is_nan() {
            return 0.0;
        }
        let clamped = magnitude.clamp(0.0, self.domain_max);
        self.max_radius * (clamped / self.domain_max).sqrt()
    }
}

/// Build a radius scale whose domain spans `[0, max(values)]`.
///
/// Empty input, an all-zero input, or a non-finite maximum produce a
/// degenerate scale instead of dividing by zero.
pub fn build_scale(values: &[f64], max_radius: f64) -> RadiusScale {
    let domain_max = values
        .iter()
        .copied()
        .filter(|value| !value.is_nan())
        .fold(0.0_f64, f64::max);
    if !domain_max.is_finite() || domain_max <= 0.0 {
        return RadiusScale::degenerate(max_radius.max(0.0));
    }
    RadiusScale {
        domain_max,
        max_radius: max_radius.max(0.0),
    }
}
