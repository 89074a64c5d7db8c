use crate::core::units::{CM, M, MEV, MM};
use crate::error::{Error, Result};

/// Run-wide detector and primary-particle configuration.
///
/// Mirrors the command surface the run driver exposes: every field is a
/// recognized option. Lengths are in millimetres, energies in MeV
/// (see [`crate::core::units`]).
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    /// Edge length of the cubic lab (world) volume.
    pub lab_size: f64,
    /// Length of the cylindrical active volume.
    pub detector_length: f64,
    /// Radius of the cylindrical active volume.
    pub detector_radius: f64,
    /// Aluminium vessel wall thickness.
    pub vessel_thickness: f64,
    /// PTFE reflector lining thickness.
    pub reflector_thickness: f64,
    /// Light-sensor disc thickness.
    pub sensor_thickness: f64,
    /// Light-sensor disc radius.
    pub sensor_radius: f64,
    /// Kinetic energy of every injected primary particle.
    pub particle_energy: f64,
    /// Scintillation yield of the active medium, photons per MeV.
    pub scint_yield: f64,
    /// Verbosity of the general physics configuration.
    pub physics_verbose: i32,
    /// Verbosity of the electromagnetic physics configuration.
    pub em_verbose: i32,
    /// Verbosity of the optical physics configuration.
    pub optical_verbose: i32,
    /// Injected primary-particle species, by name.
    pub particle: String,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            lab_size: 3.0 * M,
            detector_length: 1.0 * M,
            detector_radius: 0.62 * M,
            vessel_thickness: 1.0 * CM,
            reflector_thickness: 0.5 * MM,
            sensor_thickness: 10.0 * MM,
            sensor_radius: 202.0 * MM,
            particle_energy: 30.0 * MEV,
            scint_yield: 3200.0 / MEV,
            physics_verbose: 0,
            em_verbose: 0,
            optical_verbose: 0,
            particle: "e-".to_string(),
        }
    }
}

impl DetectorConfig {
    /// Check every geometry and particle parameter for consistency.
    ///
    /// Errors with `Error::InvalidParam` on the first violated constraint;
    /// a config that passes here can be handed to the layout and geometry
    /// builders without further checks.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("lab_size", self.lab_size),
            ("detector_length", self.detector_length),
            ("detector_radius", self.detector_radius),
            ("vessel_thickness", self.vessel_thickness),
            ("reflector_thickness", self.reflector_thickness),
            ("sensor_thickness", self.sensor_thickness),
            ("sensor_radius", self.sensor_radius),
            ("particle_energy", self.particle_energy),
            ("scint_yield", self.scint_yield),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidParam(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }
        if self.sensor_thickness >= self.detector_length {
            return Err(Error::InvalidParam(
                "sensor_thickness must be smaller than detector_length".into(),
            ));
        }
        let outer =
            self.detector_radius + self.vessel_thickness + self.reflector_thickness;
        if 2.0 * outer >= self.lab_size {
            return Err(Error::InvalidParam(
                "detector does not fit inside lab_size".into(),
            ));
        }
        if self.particle.is_empty() {
            return Err(Error::InvalidParam("particle name must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() -> Result<()> {
        DetectorConfig::default().validate()
    }

    #[test]
    fn defaults_match_quoted_values() {
        let c = DetectorConfig::default();
        assert_eq!(c.detector_radius, 620.0);
        assert_eq!(c.detector_length, 1000.0);
        assert_eq!(c.sensor_radius, 202.0);
        assert_eq!(c.particle_energy, 30.0);
        assert_eq!(c.particle, "e-");
    }

    #[test]
    fn non_positive_radius_rejected() {
        let cfg = DetectorConfig {
            detector_radius: 0.0,
            ..DetectorConfig::default()
        };
        let msg = cfg.validate().unwrap_err().to_string();
        assert!(msg.contains("detector_radius"));
    }

    #[test]
    fn oversized_detector_rejected() {
        let cfg = DetectorConfig {
            lab_size: 1.0 * M,
            ..DetectorConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn nan_parameter_rejected() {
        let cfg = DetectorConfig {
            particle_energy: f64::NAN,
            ..DetectorConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
