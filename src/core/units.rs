//! Numeric unit constants for geometry and energy parameters.
//!
//! Lengths are stored in millimetres and energies in MeV, so configuration
//! defaults can be written the way they are quoted (`0.62 * M`, `30.0 * MEV`).

/// Millimetre, the base length unit.
pub const MM: f64 = 1.0;
/// Centimetre.
pub const CM: f64 = 10.0 * MM;
/// Metre.
pub const M: f64 = 1000.0 * MM;

/// Mega-electronvolt, the base energy unit.
pub const MEV: f64 = 1.0;
/// Kilo-electronvolt.
pub const KEV: f64 = 1e-3 * MEV;
/// Electronvolt. Per-event reports quote sensor energies in eV.
pub const EV: f64 = 1e-6 * MEV;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_ratios() {
        assert_eq!(M, 100.0 * CM);
        assert_eq!(CM, 10.0 * MM);
        assert_eq!(MEV, 1000.0 * KEV);
        assert!((MEV / EV - 1e6).abs() < 1e-6);
    }
}
