use crate::core::hits::{ChannelStats, HitAccumulator, NUM_CHANNELS};
use crate::core::layout::resolve_channel;
use crate::core::units::EV;
use crate::error::{Error, Result};
use std::fmt::Write as _;
use std::io;

/// Read-only view of one simulated step, as reported by the engine at a
/// sensor surface. Consumed by the step callback and never retained.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    /// Species of the stepping particle.
    pub species: String,
    /// Pre-step position in the lab frame.
    pub position: [f64; 3],
    /// Pre-step energy (magnitude of the pre-step momentum).
    pub energy: f64,
    /// Global time of the pre-step point.
    pub time: f64,
    /// Copy number of the touched sensor volume.
    pub copy_number: i64,
}

/// Where the controller is within one event's reset/record/flush cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No event open; the next hook must be an event start.
    Idle,
    /// An event is open and hits may be recorded.
    Accumulating,
    /// The last event has been flushed; the next event start re-enters
    /// the cycle (no separate signal returns to `Idle`).
    Reported,
}

/// Finalized per-event statistics, one per flushed event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventReport {
    /// 1-based number of the event within the run.
    pub event_number: u64,
    /// Accumulated (energy, count) per channel, in channel order.
    pub stats: [ChannelStats; NUM_CHANNELS],
}

impl EventReport {
    /// The report as one delimited line: the seven channel energies in eV,
    /// then the seven hit counts, comma-separated.
    pub fn line(&self) -> String {
        let mut out = String::new();
        for s in &self.stats {
            let _ = write!(out, "{}, ", s.energy / EV);
        }
        for (i, s) in self.stats.iter().enumerate() {
            let sep = if i + 1 < NUM_CHANNELS { ", " } else { "" };
            let _ = write!(out, "{}{}", s.count, sep);
        }
        out
    }

    /// Write the report line, newline-terminated, to a sink.
    pub fn write_to<W: io::Write>(&self, sink: &mut W) -> Result<()> {
        writeln!(sink, "{}", self.line())?;
        Ok(())
    }
}

/// Binds accumulator reset to event start, hit recording to the step
/// callback, and flush to event end.
///
/// Owns the [`HitAccumulator`] for the whole run and sequences its calls,
/// so channel statistics never leak across event boundaries. Single-event-
/// at-a-time: the engine finishes all of one event's steps before the next
/// event starts, and the controller rejects hooks arriving out of order.
#[derive(Debug)]
pub struct EventLifecycle {
    accumulator: HitAccumulator,
    tracked_species: String,
    phase: Phase,
    events_completed: u64,
}

impl EventLifecycle {
    /// A controller tracking hits of the given species.
    pub fn new(tracked_species: impl Into<String>) -> Self {
        Self {
            accumulator: HitAccumulator::new(),
            tracked_species: tracked_species.into(),
            phase: Phase::Idle,
            events_completed: 0,
        }
    }

    /// A controller tracking optical photons, the species the sensors count.
    pub fn for_optical_photons() -> Self {
        Self::new("opticalphoton")
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of events flushed so far.
    pub fn events_completed(&self) -> u64 {
        self.events_completed
    }

    /// Event-start hook: reset all channels and open the event.
    pub fn begin_event(&mut self) -> Result<()> {
        if self.phase == Phase::Accumulating {
            return Err(Error::Lifecycle(
                "event start while an event is already open".into(),
            ));
        }
        self.accumulator.reset();
        self.phase = Phase::Accumulating;
        Ok(())
    }

    /// Step hook: record a hit when the step's particle matches the
    /// tracked species.
    ///
    /// Returns whether a hit was recorded. A matching step whose copy
    /// number does not resolve to a valid channel is a fatal
    /// geometry-consistency error.
    pub fn process_step(&mut self, step: &StepRecord) -> Result<bool> {
        if self.phase != Phase::Accumulating {
            return Err(Error::Lifecycle("step callback with no event open".into()));
        }
        if step.species != self.tracked_species {
            return Ok(false);
        }
        let channel = resolve_channel(step.copy_number)?;
        self.accumulator.record_hit(channel, step.energy)?;
        Ok(true)
    }

    /// Event-end hook: flush the accumulated statistics into a report.
    pub fn end_event(&mut self) -> Result<EventReport> {
        if self.phase != Phase::Accumulating {
            return Err(Error::Lifecycle("event end with no event open".into()));
        }
        self.events_completed += 1;
        self.phase = Phase::Reported;
        Ok(EventReport {
            event_number: self.events_completed,
            stats: self.accumulator.flush(),
        })
    }
}
