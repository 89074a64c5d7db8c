//! Detector-response core: configuration, sampling, sensor layout,
//! per-event hit accumulation, and the declarative geometry/physics
//! descriptions handed to the external simulation engine.

pub mod config;
pub mod generator;
pub mod geometry;
pub mod hits;
pub mod layout;
pub mod lifecycle;
pub mod physics;
pub mod random;
pub mod units;

pub use config::DetectorConfig;
pub use generator::{PrimaryVertex, VertexGenerator};
pub use geometry::{build_geometry, MaterialSpec, Placement, Shape, Volume};
pub use hits::{Channel, ChannelStats, HitAccumulator, NUM_CHANNELS};
pub use layout::{resolve_channel, sensor_layout, SensorPlacement};
pub use lifecycle::{EventLifecycle, EventReport, Phase, StepRecord};
pub use physics::{physics_config, PhysicsConfig};
pub use random::Sampler;
