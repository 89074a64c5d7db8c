use crate::error::{Error, Result};
use ordered_float::NotNan;

/// Number of light-sensor channels: one central sensor plus six on a ring.
pub const NUM_CHANNELS: usize = 7;

/// Identifier of one light sensor, validated into `[0, NUM_CHANNELS)`.
///
/// Constructed from the copy number the engine reports for a struck sensor
/// volume; an out-of-range copy number is a geometry-consistency error and
/// fails fast rather than accumulating into the wrong slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Channel(usize);

impl Channel {
    /// Validate a raw copy number into a channel.
    pub fn new(raw: i64) -> Result<Self> {
        if raw < 0 || raw as usize >= NUM_CHANNELS {
            return Err(Error::ChannelOutOfRange {
                got: raw,
                max: NUM_CHANNELS - 1,
            });
        }
        Ok(Self(raw as usize))
    }

    /// The channel's slot index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Accumulated optical-hit statistics for one channel within one event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChannelStats {
    /// Sum of recorded hit energies.
    pub energy: f64,
    /// Number of recorded hits.
    pub count: u64,
}

/// Per-event hit statistics across all seven channels.
///
/// The value lives for the whole run; its *content* is meaningful only
/// between a `reset` and the following `flush`. The lifecycle controller
/// owns one of these and sequences the calls, so nothing carries across
/// event boundaries.
#[derive(Debug, Clone, Default)]
pub struct HitAccumulator {
    stats: [ChannelStats; NUM_CHANNELS],
}

impl HitAccumulator {
    /// An accumulator with all channels zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every channel. Called once at each event start; calling it
    /// twice in a row is equivalent to calling it once.
    pub fn reset(&mut self) {
        self.stats = [ChannelStats::default(); NUM_CHANNELS];
    }

    /// Add one hit of the given energy to a channel.
    ///
    /// The energy must be finite; NaN or infinite energies indicate a
    /// corrupt step record and are rejected before they can poison the sum.
    pub fn record_hit(&mut self, channel: Channel, energy: f64) -> Result<()> {
        let energy = NotNan::new(energy)
            .map_err(|_| Error::InvalidParam("hit energy cannot be NaN".into()))?;
        if !energy.into_inner().is_finite() {
            return Err(Error::InvalidParam(format!(
                "hit energy must be finite, got {energy}"
            )));
        }
        let slot = &mut self.stats[channel.index()];
        slot.energy += energy.into_inner();
        slot.count += 1;
        Ok(())
    }

    /// The accumulated (energy, count) pairs in channel order.
    ///
    /// Does not reset; the next event's `reset` is sequenced separately by
    /// the lifecycle controller.
    pub fn flush(&self) -> [ChannelStats; NUM_CHANNELS] {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_accepts_full_range() -> Result<()> {
        for raw in 0..7 {
            assert_eq!(Channel::new(raw)?.index(), raw as usize);
        }
        Ok(())
    }

    #[test]
    fn channel_rejects_out_of_range() {
        for raw in [-1, 7, 100, i64::MIN] {
            let err = Channel::new(raw).unwrap_err();
            assert!(matches!(err, Error::ChannelOutOfRange { .. }));
        }
    }

    #[test]
    fn round_trip_sums_and_counts() -> Result<()> {
        let mut acc = HitAccumulator::new();
        acc.reset();
        acc.record_hit(Channel::new(2)?, 1.5)?;
        acc.record_hit(Channel::new(2)?, 0.25)?;
        acc.record_hit(Channel::new(5)?, 4.0)?;
        let stats = acc.flush();
        assert_eq!(stats[2], ChannelStats { energy: 1.75, count: 2 });
        assert_eq!(stats[5], ChannelStats { energy: 4.0, count: 1 });
        for idx in [0, 1, 3, 4, 6] {
            assert_eq!(stats[idx], ChannelStats::default());
        }
        Ok(())
    }

    #[test]
    fn reset_is_idempotent_and_clears_prior_state() -> Result<()> {
        let mut acc = HitAccumulator::new();
        acc.record_hit(Channel::new(0)?, 9.0)?;
        acc.reset();
        acc.reset();
        assert_eq!(acc.flush(), [ChannelStats::default(); NUM_CHANNELS]);
        Ok(())
    }

    #[test]
    fn flush_does_not_reset() -> Result<()> {
        let mut acc = HitAccumulator::new();
        acc.record_hit(Channel::new(3)?, 2.0)?;
        let _ = acc.flush();
        assert_eq!(acc.flush()[3].count, 1);
        Ok(())
    }

    #[test]
    fn nan_energy_rejected() -> Result<()> {
        let mut acc = HitAccumulator::new();
        assert!(acc.record_hit(Channel::new(0)?, f64::NAN).is_err());
        assert!(acc.record_hit(Channel::new(0)?, f64::INFINITY).is_err());
        assert_eq!(acc.flush()[0].count, 0);
        Ok(())
    }
}
