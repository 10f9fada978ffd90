//! Platform adapter trait definition

use trait_variant::make;

use crate::core::error::AdapterResult;
use crate::core::types::{Association, NetworkProfile, ProfileDescriptor, ScanRecord};

/// Abstraction over the platform's network management surface
///
/// Hosts implement this once per radio and hand the service a shared
/// handle. The adapter is a thin capability layer: it reports state and
/// executes single operations, while sequencing and policy live in the
/// service. Platform calls that report absence (an empty listing, no
/// association) do so in-band; [`AdapterError`](crate::core::error::AdapterError)
/// is reserved for faults in the platform surface itself.
#[make(Send)]
pub trait WifiAdapter: Sync + 'static {
    /// Whether the radio is currently enabled
    async fn radio_enabled(&self) -> AdapterResult<bool>;

    /// Request the radio on or off
    ///
    /// Returns whether the platform accepted the request. The state change
    /// itself propagates asynchronously; callers re-read
    /// [`radio_enabled`](Self::radio_enabled) after a settle delay.
    async fn set_radio_enabled(&self, enabled: bool) -> AdapterResult<bool>;

    /// Trigger a fresh scan
    ///
    /// Results accumulate in the platform and are read separately via
    /// [`scan_results`](Self::scan_results).
    async fn start_scan(&self) -> AdapterResult<()>;

    /// Latest scan results known to the platform
    ///
    /// Platforms that withhold results, for example when the caller lacks
    /// location authorization, report an empty list rather than an error.
    async fn scan_results(&self) -> AdapterResult<Vec<ScanRecord>>;

    /// Saved profiles in the platform store
    ///
    /// Same absence-as-empty contract as [`scan_results`](Self::scan_results).
    async fn configured_profiles(&self) -> AdapterResult<Vec<NetworkProfile>>;

    /// Add a new profile to the store, returning its handle
    async fn add_profile(&self, descriptor: ProfileDescriptor) -> AdapterResult<i32>;

    /// Enable a saved profile
    ///
    /// `exclusive` asks the platform to keep other profiles disabled while
    /// this one is up. Returns whether the platform accepted the operation.
    async fn enable_profile(&self, network_id: i32, exclusive: bool) -> AdapterResult<bool>;

    /// Disable a saved profile, dropping the association if it is live
    async fn disable_profile(&self, network_id: i32) -> AdapterResult<()>;

    /// The current association, if the platform reports one
    async fn current_association(&self) -> AdapterResult<Option<Association>>;
}
