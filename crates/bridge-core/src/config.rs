//! Runtime configuration of the bridge core.

/// Default number of events buffered for each subscriber before the slowest one starts lagging.
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Runtime configuration of the bridge core.
///
/// Unlike the [`BridgeParams`](chainbridge_params::prelude::BridgeParams), these values only affect
/// the local instance and can differ between deployments without affecting the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BridgeCfg {
    /// The number of events buffered per subscriber.
    pub event_channel_capacity: usize,
}

impl BridgeCfg {
    /// Returns the number of events buffered per subscriber.
    pub const fn event_channel_capacity(&self) -> usize {
        self.event_channel_capacity
    }
}

impl Default for BridgeCfg {
    fn default() -> Self {
        Self {
            event_channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
        }
    }
}
