//! Periodic battery-level reporting.

use std::sync::Arc;
use std::time::Duration;

use dispatch_domain::DroneDescriptor;

use crate::registry::FleetRegistry;

/// Snapshot every drone's battery view.
///
/// The registry read lock is held only long enough to clone the drone
/// handles; each drone's fields are then read individually, so a report
/// in progress never blocks a loader for longer than one field read.
pub fn battery_report(registry: &FleetRegistry) -> Vec<DroneDescriptor> {
    registry
        .all()
        .iter()
        .map(|drone| drone.battery_view())
        .collect()
}

/// Log every drone's battery level once per `period`, forever.
///
/// Best-effort: a report that fails to serialize is logged and skipped
/// rather than terminating the loop.
pub async fn run_battery_reporter(registry: Arc<FleetRegistry>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    // The first tick of an interval fires immediately; consume it so the
    // first report lands one full period after startup.
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let report = battery_report(&registry);
        match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                tracing::info!(drones = report.len(), "drone battery levels:\n{json}");
            }
            Err(err) => {
                tracing::warn!(error = %err, "battery report could not be serialized");
            }
        }
    }
}
