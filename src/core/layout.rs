use crate::core::config::DetectorConfig;
use crate::core::hits::{Channel, NUM_CHANNELS};
use crate::error::{Error, Result};
use std::f64::consts::PI;

/// Placement of one sensor inside the active volume.
///
/// Positions are in the detector local frame: transverse (x, y),
/// longitudinal z along the cylinder axis. All sensors share the same
/// axis-aligned orientation, facing into the active medium.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorPlacement {
    /// Readout channel, equal to the placed copy number.
    pub channel: Channel,
    /// Sensor centre relative to the active-volume centre.
    pub position: [f64; 3],
}

/// Compute the placement of all seven sensors.
///
/// Channel 0 sits on the detector axis; channels 1..=6 sit on a ring of
/// radius `R - r - r/20` at angles `π·i/3` (60° apart, the first at 60°,
/// none at 0°). Every sensor is flush with the −z end of the active
/// volume. Deterministic: the same config always yields the same layout.
pub fn sensor_layout(config: &DetectorConfig) -> Result<Vec<SensorPlacement>> {
    config.validate()?;
    let margin = config.sensor_radius / 20.0;
    let ring_radius = config.detector_radius - config.sensor_radius - margin;
    if ring_radius <= 0.0 {
        return Err(Error::InvalidParam(format!(
            "sensors of radius {} cannot ring inside active radius {}",
            config.sensor_radius, config.detector_radius
        )));
    }
    // Flush with the end cap: centre offset by half the thickness difference.
    let z = (config.sensor_thickness - config.detector_length) / 2.0;

    let mut placements = Vec::with_capacity(NUM_CHANNELS);
    placements.push(SensorPlacement {
        channel: Channel::new(0)?,
        position: [0.0, 0.0, z],
    });
    for i in 1..NUM_CHANNELS as i64 {
        let theta = PI * i as f64 / 3.0;
        placements.push(SensorPlacement {
            channel: Channel::new(i)?,
            position: [ring_radius * theta.cos(), ring_radius * theta.sin(), z],
        });
    }
    Ok(placements)
}

/// Map a struck volume's copy number to its readout channel.
///
/// Copy numbers are assigned by [`sensor_layout`] as the channel index
/// itself, so this is the identity over the valid range and fails fast
/// outside it.
pub fn resolve_channel(copy_number: i64) -> Result<Channel> {
    Channel::new(copy_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Vec<SensorPlacement> {
        sensor_layout(&DetectorConfig::default()).expect("default layout")
    }

    #[test]
    fn seven_sensors_channels_in_order() {
        let l = layout();
        assert_eq!(l.len(), 7);
        for (i, p) in l.iter().enumerate() {
            assert_eq!(p.channel.index(), i);
        }
    }

    #[test]
    fn central_sensor_on_axis() {
        let p = layout()[0];
        assert_eq!(p.position[0], 0.0);
        assert_eq!(p.position[1], 0.0);
    }

    #[test]
    fn ring_sensors_fit_inside_vessel() {
        let cfg = DetectorConfig::default();
        for p in &layout()[1..] {
            let rho = (p.position[0].powi(2) + p.position[1].powi(2)).sqrt();
            assert!(
                rho + cfg.sensor_radius <= cfg.detector_radius,
                "sensor {} at rho {} overlaps wall",
                p.channel.index(),
                rho
            );
        }
    }

    #[test]
    fn ring_sensors_sixty_degrees_apart_starting_at_sixty() {
        let l = layout();
        for (i, p) in l[1..].iter().enumerate() {
            let expect = PI * (i as f64 + 1.0) / 3.0;
            let angle = p.position[1].atan2(p.position[0]);
            // Compare on the circle: the raw difference may be a full turn.
            let diff = (angle - expect).rem_euclid(2.0 * PI);
            assert!(
                diff < 1e-12 || 2.0 * PI - diff < 1e-12,
                "channel {} at angle {}, expected {}",
                p.channel.index(),
                angle,
                expect
            );
        }
    }

    #[test]
    fn sensors_flush_with_minus_z_end() {
        let cfg = DetectorConfig::default();
        let z = (cfg.sensor_thickness - cfg.detector_length) / 2.0;
        for p in layout() {
            assert_eq!(p.position[2], z);
        }
    }

    #[test]
    fn layout_is_deterministic() {
        assert_eq!(layout(), layout());
    }

    #[test]
    fn oversized_sensor_rejected() {
        let cfg = DetectorConfig {
            sensor_radius: 610.0,
            ..DetectorConfig::default()
        };
        assert!(sensor_layout(&cfg).is_err());
    }

    #[test]
    fn resolve_channel_identity_and_fail_fast() {
        for raw in 0..7 {
            assert_eq!(resolve_channel(raw).expect("valid").index(), raw as usize);
        }
        assert!(resolve_channel(-1).is_err());
        assert!(resolve_channel(7).is_err());
    }
}
