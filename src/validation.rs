//! Validation for coordinates handed to the index.

use crate::config::Domain;
use crate::error::{QuadCellError, Result};
use quadcell_types::bounds::Bounds2D;

/// Validates a point is finite and lies inside `domain`, edges included.
///
/// # Examples
///
/// ```
/// use quadcell::Domain;
/// use quadcell::validation::validate_point;
///
/// // Minsk
/// assert!(validate_point(&Domain::GEOGRAPHIC, 27.56, 53.90).is_ok());
///
/// // Latitude past the pole
/// assert!(validate_point(&Domain::GEOGRAPHIC, 27.56, 95.0).is_err());
///
/// // Not a number
/// assert!(validate_point(&Domain::GEOGRAPHIC, f64::NAN, 0.0).is_err());
/// ```
pub fn validate_point(domain: &Domain, x: f64, y: f64) -> Result<()> {
    if !x.is_finite() {
        return Err(QuadCellError::InvalidCoordinate(format!(
            "x must be finite, got: {}",
            x
        )));
    }

    if !y.is_finite() {
        return Err(QuadCellError::InvalidCoordinate(format!(
            "y must be finite, got: {}",
            y
        )));
    }

    if !domain.bounds().contains_point(x, y) {
        return Err(QuadCellError::OutOfDomain { x, y });
    }

    Ok(())
}

/// Validates a query rectangle has no NaN coordinates.
///
/// Infinite coordinates are allowed; coverings clip them to the domain.
pub fn validate_rect(rect: &Bounds2D) -> Result<()> {
    if rect.has_nan() {
        return Err(QuadCellError::InvalidCoordinate(format!(
            "rectangle has NaN coordinates: {:?}",
            rect
        )));
    }
    Ok(())
}
