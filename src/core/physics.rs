use crate::core::config::DetectorConfig;
use crate::error::Result;

/// Declarative description of the physics process set the external engine
/// should configure for a run.
///
/// The base hadronic list is replaced by the precision electromagnetic
/// option and extended with the optical processes that produce the
/// scintillation photons the sensors count.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    /// Name of the base reference physics list.
    pub base_list: String,
    /// Electromagnetic physics option level (4 = most precise standard set).
    pub em_option: u8,
    /// Whether optical-photon processes are registered.
    pub optical: bool,
    /// Scintillation photon yield handed to the optical processes, per MeV.
    pub scint_yield: f64,
    pub physics_verbose: i32,
    pub em_verbose: i32,
    pub optical_verbose: i32,
}

/// Build the physics configuration from the run-wide options.
pub fn physics_config(config: &DetectorConfig) -> Result<PhysicsConfig> {
    config.validate()?;
    Ok(PhysicsConfig {
        base_list: "FTFP_BERT".into(),
        em_option: 4,
        optical: true,
        scint_yield: config.scint_yield,
        physics_verbose: config.physics_verbose,
        em_verbose: config.em_verbose,
        optical_verbose: config.optical_verbose,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_physics_set() -> Result<()> {
        let p = physics_config(&DetectorConfig::default())?;
        assert_eq!(p.base_list, "FTFP_BERT");
        assert_eq!(p.em_option, 4);
        assert!(p.optical);
        assert_eq!(p.scint_yield, 3200.0);
        assert_eq!((p.physics_verbose, p.em_verbose, p.optical_verbose), (0, 0, 0));
        Ok(())
    }

    #[test]
    fn verbosities_forwarded() -> Result<()> {
        let cfg = DetectorConfig {
            em_verbose: 2,
            ..DetectorConfig::default()
        };
        assert_eq!(physics_config(&cfg)?.em_verbose, 2);
        Ok(())
    }
}
