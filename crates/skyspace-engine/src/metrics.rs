//! Per-tick counters for the simulation engine.
//!
//! [`TickMetrics`] is filled in by whichever world ran the tick and
//! travels inside the [`TickReport`](crate::TickReport).

/// Timing and counts collected during a single tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickMetrics {
    /// Wall-clock time for the entire tick, in microseconds.
    pub total_us: u64,
    /// Aircraft that asked the planner for a decision this tick.
    pub planned: u32,
    /// Aircraft that changed cell this tick (landings included).
    pub moved: u32,
    /// Aircraft that held this tick.
    pub held: u32,
    /// Aircraft that reached their destination this tick.
    pub landed: u32,
    /// Grid updates sent to other participants. Always zero in
    /// single-process mode.
    pub broadcasts: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = TickMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.planned, 0);
        assert_eq!(m.moved, 0);
        assert_eq!(m.held, 0);
        assert_eq!(m.landed, 0);
        assert_eq!(m.broadcasts, 0);
    }
}
