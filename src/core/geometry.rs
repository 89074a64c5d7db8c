use crate::core::config::DetectorConfig;
use crate::core::layout::sensor_layout;
use crate::error::Result;
use std::fmt::Write as _;

/// Solid shape of one volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Cube of the given edge length.
    Cube { side: f64 },
    /// Solid cylinder of the given radius and full length along z.
    Tubs { r: f64, z: f64 },
}

/// Material of one volume, identified for the external engine; property
/// tables (refractive index, scintillation spectra) are the engine's
/// concern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialSpec {
    Air,
    Aluminium,
    PtfeReflector,
    /// Heavy-water scintillator with the configured light yield.
    HeavyWaterScintillator { yield_per_mev: f64 },
}

/// Placement of a volume inside its mother.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Translation relative to the mother's centre.
    pub translation: [f64; 3],
    /// Rotation about the mother's x axis, degrees.
    pub rot_x_deg: f64,
    /// Copy number distinguishing repeated placements of the same volume.
    pub copy_number: Option<i64>,
}

impl Placement {
    fn at_z(z: f64) -> Self {
        Self {
            translation: [0.0, 0.0, z],
            rot_x_deg: 0.0,
            copy_number: None,
        }
    }
}

/// One node of the declarative volume tree handed to the external engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    pub name: String,
    pub material: MaterialSpec,
    pub shape: Shape,
    pub placement: Placement,
    /// Whether steps ending on this volume feed the hit pipeline.
    pub sensitive: bool,
    pub children: Vec<Volume>,
}

impl Volume {
    /// Find a descendant (or self) by name; for repeated placements the
    /// first match is returned.
    pub fn find(&self, name: &str) -> Option<&Volume> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    /// Indented one-line-per-volume rendering of the tree.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        self.describe_into(&mut out, 0);
        out
    }

    fn describe_into(&self, out: &mut String, depth: usize) {
        let copy = match self.placement.copy_number {
            Some(n) => format!(" copy {n}"),
            None => String::new(),
        };
        let _ = writeln!(
            out,
            "{:indent$}{}{} at {:?}",
            "",
            self.name,
            copy,
            self.placement.translation,
            indent = 2 * depth
        );
        for c in &self.children {
            c.describe_into(out, depth + 1);
        }
    }
}

/// Assemble the full detector: lab world containing the aluminium vessel,
/// the PTFE reflector lining, the heavy-water active volume, and the seven
/// sensors placed by the layout engine.
///
/// The vessel is rotated 90° about x, so the detector axis runs along the
/// lab y axis while child placements use the detector local frame. Each
/// wrapping layer is shifted along local z by half the thickness it adds,
/// keeping the stack of end walls flush on one side.
pub fn build_geometry(config: &DetectorConfig) -> Result<Volume> {
    config.validate()?;

    let sensors: Vec<Volume> = sensor_layout(config)?
        .into_iter()
        .map(|p| Volume {
            name: "PMT".into(),
            material: MaterialSpec::Air,
            shape: Shape::Tubs {
                r: config.sensor_radius,
                z: config.sensor_thickness,
            },
            placement: Placement {
                translation: p.position,
                rot_x_deg: 0.0,
                copy_number: Some(p.channel.index() as i64),
            },
            sensitive: true,
            children: Vec::new(),
        })
        .collect();

    let water = Volume {
        name: "Water".into(),
        material: MaterialSpec::HeavyWaterScintillator {
            yield_per_mev: config.scint_yield,
        },
        shape: Shape::Tubs {
            r: config.detector_radius,
            z: config.detector_length,
        },
        placement: Placement::at_z(-config.reflector_thickness / 2.0),
        sensitive: false,
        children: sensors,
    };

    let reflector = Volume {
        name: "Reflector".into(),
        material: MaterialSpec::PtfeReflector,
        shape: Shape::Tubs {
            r: config.detector_radius + config.reflector_thickness,
            z: config.detector_length + config.reflector_thickness,
        },
        placement: Placement::at_z(-config.vessel_thickness / 2.0),
        sensitive: false,
        children: vec![water],
    };

    let vessel = Volume {
        name: "Vessel".into(),
        material: MaterialSpec::Aluminium,
        shape: Shape::Tubs {
            r: config.detector_radius
                + config.vessel_thickness
                + config.reflector_thickness,
            z: config.detector_length
                + config.vessel_thickness
                + config.reflector_thickness,
        },
        placement: Placement {
            translation: [
                0.0,
                0.0,
                (config.vessel_thickness + config.reflector_thickness) / 2.0,
            ],
            rot_x_deg: 90.0,
            copy_number: None,
        },
        sensitive: false,
        children: vec![reflector],
    };

    Ok(Volume {
        name: "World".into(),
        material: MaterialSpec::Air,
        shape: Shape::Cube {
            side: config.lab_size,
        },
        placement: Placement::at_z(0.0),
        sensitive: false,
        children: vec![vessel],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> Volume {
        build_geometry(&DetectorConfig::default()).expect("default geometry")
    }

    #[test]
    fn nesting_world_vessel_reflector_water_sensors() {
        let w = world();
        let vessel = w.find("Vessel").expect("vessel");
        let reflector = vessel.find("Reflector").expect("reflector");
        let water = reflector.find("Water").expect("water");
        assert_eq!(water.children.len(), 7);
        assert!(water.children.iter().all(|s| s.sensitive));
    }

    #[test]
    fn sensor_copy_numbers_are_channels() {
        let w = world();
        let water = w.find("Water").expect("water");
        let copies: Vec<i64> = water
            .children
            .iter()
            .filter_map(|s| s.placement.copy_number)
            .collect();
        assert_eq!(copies, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn wrapping_offsets_keep_end_walls_flush() {
        let cfg = DetectorConfig::default();
        let w = world();
        let vessel = w.find("Vessel").expect("vessel");
        assert_eq!(
            vessel.placement.translation[2],
            (cfg.vessel_thickness + cfg.reflector_thickness) / 2.0
        );
        assert_eq!(vessel.placement.rot_x_deg, 90.0);
        let reflector = w.find("Reflector").expect("reflector");
        assert_eq!(
            reflector.placement.translation[2],
            -cfg.vessel_thickness / 2.0
        );
        let water = w.find("Water").expect("water");
        assert_eq!(
            water.placement.translation[2],
            -cfg.reflector_thickness / 2.0
        );
    }

    #[test]
    fn active_medium_carries_configured_yield() {
        let w = world();
        let water = w.find("Water").expect("water");
        assert_eq!(
            water.material,
            MaterialSpec::HeavyWaterScintillator { yield_per_mev: 3200.0 }
        );
    }

    #[test]
    fn describe_lists_every_volume() {
        let text = world().describe();
        for name in ["World", "Vessel", "Reflector", "Water", "PMT copy 6"] {
            assert!(text.contains(name), "missing {name} in:\n{text}");
        }
    }
}
