// Celestial position, frame selected by the header coord_type field

use serde::Serialize;
use std::fmt;

/// Position of the observed source. Only the two discriminant values
/// the format defines are representable; any other coord_type leaves
/// the header without a position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "frame", rename_all = "snake_case")]
pub enum SkyPosition {
    /// J2000 equatorial, stored in radians (coord_type "05").
    Equatorial { ra_rad: f64, dec_rad: f64 },
    /// Galactic, stored in degrees (coord_type "04").
    Galactic { l_deg: f64, b_deg: f64 },
}

impl SkyPosition {
    /// Build a position from the raw header fields, gated on the
    /// coord_type discriminant. Unknown discriminants warn and yield
    /// `None`; the file read carries on without a position.
    pub fn from_coord_type(
        coord_type: &str,
        ra_rad: f64,
        dec_rad: f64,
        l_deg: f64,
        b_deg: f64,
    ) -> Option<SkyPosition> {
        match coord_type {
            "05" => Some(SkyPosition::Equatorial { ra_rad, dec_rad }),
            "04" => Some(SkyPosition::Galactic { l_deg, b_deg }),
            other => {
                tracing::warn!("do not know how to interpret coordinate type '{}'", other);
                None
            }
        }
    }
}

impl fmt::Display for SkyPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkyPosition::Equatorial { ra_rad, dec_rad } => {
                write!(f, "ra = {:.6} rad, dec = {:.6} rad (J2000)", ra_rad, dec_rad)
            }
            SkyPosition::Galactic { l_deg, b_deg } => {
                write!(f, "l = {:.4} deg, b = {:.4} deg (galactic)", l_deg, b_deg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_type_dispatch() {
        assert_eq!(
            SkyPosition::from_coord_type("05", 1.25, -0.5, 0.0, 0.0),
            Some(SkyPosition::Equatorial {
                ra_rad: 1.25,
                dec_rad: -0.5
            })
        );
        assert_eq!(
            SkyPosition::from_coord_type("04", 0.0, 0.0, 120.0, -3.5),
            Some(SkyPosition::Galactic {
                l_deg: 120.0,
                b_deg: -3.5
            })
        );
        assert_eq!(SkyPosition::from_coord_type("02", 1.0, 1.0, 1.0, 1.0), None);
        assert_eq!(SkyPosition::from_coord_type("", 1.0, 1.0, 1.0, 1.0), None);
    }
}
