//! Tests for the [`BridgeCore`](super::BridgeCore) façade.


use tokio::sync::broadcast;

use crate::events::BridgeEvent;

/// Collects every event currently buffered in `rx`.
pub(super) fn drain(rx: &mut broadcast::Receiver<BridgeEvent>) -> Vec<BridgeEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }

    events
}
