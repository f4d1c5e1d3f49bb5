//! Run configuration.
//!
//! Plain structs loaded by the application and injected explicitly — there
//! is no global configuration state anywhere in the workspace.

/// Top-level simulation configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Total ticks to simulate (exclusive upper bound).
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> crate::Tick {
        crate::Tick(self.total_ticks)
    }
}

/// Tunables of the dispatch core.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchConfig {
    /// A planned route is sent out once its remaining slack drops below this
    /// many ticks.
    pub send_out_slack_ticks: u64,

    /// A planned route is sent out once its loaded weight reaches this
    /// fraction of the vehicle capacity.
    pub send_out_weight_frac: f64,

    /// Toggle the idle-vehicle rebalancer that runs after all dispatchers
    /// have ticked.
    pub rebalance_enabled: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            send_out_slack_ticks: 5,
            send_out_weight_frac: 0.95,
            rebalance_enabled: true,
        }
    }
}
