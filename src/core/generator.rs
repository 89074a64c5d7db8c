use crate::core::config::DetectorConfig;
use crate::core::random::Sampler;
use crate::error::Result;

/// Initial state of one injected primary particle.
///
/// Built fresh for every event and handed straight to the engine's
/// particle-injection interface; never retained.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryVertex {
    /// Starting position in the lab frame.
    pub position: [f64; 3],
    /// Unit direction of the initial momentum.
    pub direction: [f64; 3],
    /// Kinetic energy.
    pub energy: f64,
    /// Particle species name.
    pub species: String,
}

/// Per-event source of primary vertices inside the active volume.
///
/// Position sampling is exact: an area-uniform transverse point on the
/// detector disc plus a uniform longitudinal coordinate, so no rejection
/// loop is needed and every vertex lies inside the cylinder. In the lab
/// frame the detector axis runs along y, so the disc sample lands on
/// (x, z) and the longitudinal draw on y. Energy and species are run-wide
/// configuration, not resampled.
#[derive(Debug, Clone)]
pub struct VertexGenerator {
    radius: f64,
    half_length: f64,
    energy: f64,
    species: String,
}

impl VertexGenerator {
    /// Build a generator from a validated configuration.
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            radius: config.detector_radius,
            half_length: config.detector_length / 2.0,
            energy: config.particle_energy,
            species: config.particle.clone(),
        })
    }

    /// Sample one primary vertex.
    pub fn generate(&self, sampler: &mut Sampler) -> Result<PrimaryVertex> {
        let (x, z) = sampler.on_disc(self.radius)?;
        let y = sampler.uniform(-self.half_length, self.half_length)?;
        Ok(PrimaryVertex {
            position: [x, y, z],
            direction: sampler.isotropic_direction(),
            energy: self.energy,
            species: self.species.clone(),
        })
    }
}
