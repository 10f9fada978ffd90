//! Runtime settings

use std::time::Duration;

/// Settle delays for the staged connect sequence
///
/// The platform acknowledges radio enables and scan triggers without a
/// completion signal, so the sequence waits a fixed interval before
/// re-reading state. Hosts with slower radios tune these upward.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Wait after requesting a radio enable before re-reading radio state
    pub radio_settle: Duration,
    /// Wait after triggering a scan before reading results
    pub scan_settle: Duration,
}

impl Settings {
    pub fn new(radio_settle: Duration, scan_settle: Duration) -> Self {
        Settings {
            radio_settle,
            scan_settle,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new(Duration::from_secs(1), Duration::from_secs(1))
    }
}
