//! Per-tick timing and mass-balance metrics.

/// Timing and water-balance data collected during a single tick.
///
/// All durations are in microseconds. The basin fills these in after each
/// successful [`tick()`](crate::Basin::tick); read the most recent set via
/// [`last_metrics()`](crate::Basin::last_metrics).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickMetrics {
    /// Wall-clock time for the entire tick, in microseconds.
    pub total_us: u64,
    /// Per-layer evaluation times: `(name, microseconds)`, in registration order.
    pub layer_us: Vec<(String, u64)>,
    /// Time spent in advection, in microseconds.
    pub advection_us: u64,
    /// Time spent in relaxation, in microseconds.
    pub relaxation_us: u64,
    /// Total water before the tick.
    pub water_before: f64,
    /// Total water after the tick.
    pub water_after: f64,
}

impl TickMetrics {
    /// Net change in total water over the tick.
    pub fn water_delta(&self) -> f64 {
        self.water_after - self.water_before
    }
}
