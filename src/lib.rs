use numpy::ndarray::{Array1, Array2};
use numpy::{IntoPyArray, PyArray1, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

pub mod core;
pub mod error;

use crate::core::{
    build_geometry, physics_config, sensor_layout, DetectorConfig, EventLifecycle,
    Sampler, StepRecord, VertexGenerator, NUM_CHANNELS,
};

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Python-facing wrapper around the detector-response core.
///
/// The Python side plays the run driver: it configures the detector once,
/// then for each simulated event calls `begin_event`, feeds sensor-surface
/// steps through `process_step`, and collects the per-channel statistics
/// from `end_event`. `generate_primary` yields the injected particle's
/// initial state for the same event loop.
#[pyclass]
pub struct FluxDetector {
    config: DetectorConfig,
    sampler: Sampler,
    generator: VertexGenerator,
    lifecycle: EventLifecycle,
}

#[pymethods]
impl FluxDetector {
    /// Build a detector from the run-wide options.
    ///
    /// Lengths are in mm, energies in MeV. Defaults reproduce the reference
    /// detector: a 620 mm radius, 1 m long heavy-water cylinder read out by
    /// seven 202 mm sensors, injecting 30 MeV electrons.
    ///
    /// Errors: raises ValueError on inconsistent geometry parameters.
    #[new]
    #[pyo3(signature = (
        detector_radius=620.0,
        detector_length=1000.0,
        sensor_radius=202.0,
        sensor_thickness=10.0,
        vessel_thickness=10.0,
        reflector_thickness=0.5,
        lab_size=3000.0,
        particle="e-",
        particle_energy=30.0,
        scint_yield=3200.0,
        physics_verbose=0,
        em_verbose=0,
        optical_verbose=0,
        tracked_species="opticalphoton",
        seed=None,
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        detector_radius: f64,
        detector_length: f64,
        sensor_radius: f64,
        sensor_thickness: f64,
        vessel_thickness: f64,
        reflector_thickness: f64,
        lab_size: f64,
        particle: &str,
        particle_energy: f64,
        scint_yield: f64,
        physics_verbose: i32,
        em_verbose: i32,
        optical_verbose: i32,
        tracked_species: &str,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let config = DetectorConfig {
            lab_size,
            detector_length,
            detector_radius,
            vessel_thickness,
            reflector_thickness,
            sensor_thickness,
            sensor_radius,
            particle_energy,
            scint_yield,
            physics_verbose,
            em_verbose,
            optical_verbose,
            particle: particle.to_string(),
        };
        config.validate().map_err(py_err)?;
        let generator = VertexGenerator::new(&config).map_err(py_err)?;
        Ok(Self {
            config,
            sampler: Sampler::new(seed),
            generator,
            lifecycle: EventLifecycle::new(tracked_species),
        })
    }

    /// Reseed the process-wide random generator (the `/seed` command).
    fn set_seed(&mut self, seed: u64) {
        self.sampler.reseed(seed);
    }

    /// Event-start hook: zero all channel accumulators.
    fn begin_event(&mut self) -> PyResult<()> {
        self.lifecycle.begin_event().map_err(py_err)
    }

    /// Step hook for a step ending on a sensor surface.
    ///
    /// Records a hit when `species` matches the tracked species; returns
    /// whether a hit was recorded. A matching step with a copy number
    /// outside [0, 6] raises ValueError (geometry inconsistency).
    #[pyo3(signature = (species, copy_number, energy, position=(0.0, 0.0, 0.0), time=0.0))]
    fn process_step(
        &mut self,
        species: &str,
        copy_number: i64,
        energy: f64,
        position: (f64, f64, f64),
        time: f64,
    ) -> PyResult<bool> {
        let step = StepRecord {
            species: species.to_string(),
            position: [position.0, position.1, position.2],
            energy,
            time,
            copy_number,
        };
        self.lifecycle.process_step(&step).map_err(py_err)
    }

    /// Event-end hook: flush the event's statistics.
    ///
    /// Returns (energies, counts, line): NumPy arrays of the 7 channel
    /// energy sums (MeV) and hit counts, plus the delimited report line
    /// (energies in eV, then counts).
    fn end_event<'py>(
        &mut self,
        py: Python<'py>,
    ) -> PyResult<(Py<PyArray1<f64>>, Py<PyArray1<u64>>, String)> {
        let report = self.lifecycle.end_event().map_err(py_err)?;
        let mut energies = Array1::<f64>::zeros(NUM_CHANNELS);
        let mut counts = Array1::<u64>::zeros(NUM_CHANNELS);
        for (i, s) in report.stats.iter().enumerate() {
            energies[i] = s.energy;
            counts[i] = s.count;
        }
        Ok((
            energies.into_pyarray(py).to_owned().into(),
            counts.into_pyarray(py).to_owned().into(),
            report.line(),
        ))
    }

    /// Number of events flushed so far.
    fn events_completed(&self) -> u64 {
        self.lifecycle.events_completed()
    }

    /// Sample one primary vertex: ((x, y, z), (dx, dy, dz), energy, species).
    ///
    /// The position is uniform over the active cylinder, the direction
    /// isotropic; energy and species are the configured run-wide values.
    fn generate_primary(
        &mut self,
    ) -> PyResult<((f64, f64, f64), (f64, f64, f64), f64, String)> {
        let v = self
            .generator
            .generate(&mut self.sampler)
            .map_err(py_err)?;
        let [x, y, z] = v.position;
        let [dx, dy, dz] = v.direction;
        Ok(((x, y, z), (dx, dy, dz), v.energy, v.species))
    }

    /// Sensor centre positions as a NumPy array of shape (7, 3), in the
    /// detector local frame, in channel order.
    fn sensor_positions<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray2<f64>>> {
        let layout = sensor_layout(&self.config).map_err(py_err)?;
        let mut arr = Array2::<f64>::zeros((layout.len(), 3));
        for (i, p) in layout.iter().enumerate() {
            for k in 0..3 {
                arr[[i, k]] = p.position[k];
            }
        }
        Ok(arr.into_pyarray(py).to_owned().into())
    }

    /// Indented rendering of the placed volume tree
    /// (world, vessel, reflector, active volume, sensors).
    fn geometry_tree(&self) -> PyResult<String> {
        Ok(build_geometry(&self.config).map_err(py_err)?.describe())
    }

    /// The configured physics process set as a dict.
    fn physics_summary<'py>(&self, py: Python<'py>) -> PyResult<Py<PyDict>> {
        let p = physics_config(&self.config).map_err(py_err)?;
        let out = PyDict::new(py);
        out.set_item("base_list", p.base_list)?;
        out.set_item("em_option", p.em_option)?;
        out.set_item("optical", p.optical)?;
        out.set_item("scint_yield", p.scint_yield)?;
        out.set_item("physics_verbose", p.physics_verbose)?;
        out.set_item("em_verbose", p.em_verbose)?;
        out.set_item("optical_verbose", p.optical_verbose)?;
        Ok(out.into())
    }

    /// A point uniform in area over a disc of the given radius.
    fn sample_on_disc(&mut self, radius: f64) -> PyResult<(f64, f64)> {
        self.sampler.on_disc(radius).map_err(py_err)
    }

    /// A uniform scalar in [low, high).
    fn sample_uniform(&mut self, low: f64, high: f64) -> PyResult<f64> {
        self.sampler.uniform(low, high).map_err(py_err)
    }

    /// A unit direction uniform over the sphere.
    fn sample_isotropic_direction(&mut self) -> (f64, f64, f64) {
        let [x, y, z] = self.sampler.isotropic_direction();
        (x, y, z)
    }
}

/// The fluxdet Python module entry point.
#[pymodule]
fn fluxdet(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<FluxDetector>()?;
    Ok(())
}
