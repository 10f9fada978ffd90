//! Mock platform adapter for testing

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::adapter::WifiAdapter;
use crate::core::error::{AdapterError, AdapterResult};
use crate::core::types::{
    Association, NetworkProfile, ProfileDescriptor, ProfileStatus, ScanRecord,
};

/// Internal state for the mock adapter
#[derive(Debug)]
struct MockState {
    radio_enabled: bool,
    radio_stuck_off: bool,
    scan_records: Vec<ScanRecord>,
    profiles: Vec<NetworkProfile>,
    association: Option<Association>,
    next_network_id: i32,
    enable_accepted: bool,
    should_fail_radio: bool,
    should_fail_scan: bool,
    should_fail_scan_results: bool,
    should_fail_profile_store: bool,
    should_fail_association: bool,
    scans_started: usize,
    radio_requests: Vec<bool>,
    added_profiles: Vec<ProfileDescriptor>,
    enable_calls: Vec<(i32, bool)>,
    disable_calls: Vec<i32>,
}

/// Mock platform adapter for testing
///
/// Allows configuring platform behavior for tests without real hardware,
/// and records store mutations so tests can assert which side effects an
/// operation performed.
#[derive(Debug, Clone)]
pub struct MockWifiAdapter {
    inner: Arc<Mutex<MockState>>,
}

impl MockWifiAdapter {
    /// Create a new mock adapter with the radio enabled and an empty store
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockState {
                radio_enabled: true,
                radio_stuck_off: false,
                scan_records: vec![],
                profiles: vec![],
                association: None,
                next_network_id: 1,
                enable_accepted: true,
                should_fail_radio: false,
                should_fail_scan: false,
                should_fail_scan_results: false,
                should_fail_profile_store: false,
                should_fail_association: false,
                scans_started: 0,
                radio_requests: vec![],
                added_profiles: vec![],
                enable_calls: vec![],
                disable_calls: vec![],
            })),
        }
    }

    /// Set the reported radio state directly
    pub async fn set_radio_state(&self, enabled: bool) {
        self.inner.lock().await.radio_enabled = enabled;
    }

    /// Configure enable requests to be accepted without the radio ever
    /// coming up, mimicking a rfkill-style hardware block
    pub async fn set_radio_stuck_off(&self, stuck: bool) {
        let mut state = self.inner.lock().await;
        state.radio_stuck_off = stuck;
        if stuck {
            state.radio_enabled = false;
        }
    }

    /// Configure the records returned by scan result reads
    pub async fn set_scan_records(&self, records: Vec<ScanRecord>) {
        self.inner.lock().await.scan_records = records;
    }

    /// Seed the profile store
    pub async fn set_profiles(&self, profiles: Vec<NetworkProfile>) {
        self.inner.lock().await.profiles = profiles;
    }

    /// Set the reported live association
    pub async fn set_association(&self, association: Option<Association>) {
        self.inner.lock().await.association = association;
    }

    /// Configure whether enable_profile reports acceptance
    pub async fn set_enable_accepted(&self, accepted: bool) {
        self.inner.lock().await.enable_accepted = accepted;
    }

    /// Configure radio operations to fail
    pub async fn set_radio_failure(&self, should_fail: bool) {
        self.inner.lock().await.should_fail_radio = should_fail;
    }

    /// Configure scan triggers to fail
    pub async fn set_scan_failure(&self, should_fail: bool) {
        self.inner.lock().await.should_fail_scan = should_fail;
    }

    /// Configure scan result reads to fail
    pub async fn set_scan_results_failure(&self, should_fail: bool) {
        self.inner.lock().await.should_fail_scan_results = should_fail;
    }

    /// Configure profile store operations to fail
    pub async fn set_profile_store_failure(&self, should_fail: bool) {
        self.inner.lock().await.should_fail_profile_store = should_fail;
    }

    /// Configure association lookups to fail
    pub async fn set_association_failure(&self, should_fail: bool) {
        self.inner.lock().await.should_fail_association = should_fail;
    }

    /// Number of scans triggered so far
    pub async fn scans_started(&self) -> usize {
        self.inner.lock().await.scans_started
    }

    /// Radio states requested through set_radio_enabled, in order
    pub async fn radio_requests(&self) -> Vec<bool> {
        self.inner.lock().await.radio_requests.clone()
    }

    /// Descriptors passed to add_profile, in order
    pub async fn added_profiles(&self) -> Vec<ProfileDescriptor> {
        self.inner.lock().await.added_profiles.clone()
    }

    /// (network_id, exclusive) pairs passed to enable_profile, in order
    pub async fn enable_calls(&self) -> Vec<(i32, bool)> {
        self.inner.lock().await.enable_calls.clone()
    }

    /// Handles passed to disable_profile, in order
    pub async fn disable_calls(&self) -> Vec<i32> {
        self.inner.lock().await.disable_calls.clone()
    }
}

impl Default for MockWifiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl WifiAdapter for MockWifiAdapter {
    async fn radio_enabled(&self) -> AdapterResult<bool> {
        let state = self.inner.lock().await;
        if state.should_fail_radio {
            Err(AdapterError::RadioControl("Mock radio failure".into()))
        } else {
            Ok(state.radio_enabled)
        }
    }

    async fn set_radio_enabled(&self, enabled: bool) -> AdapterResult<bool> {
        let mut state = self.inner.lock().await;
        if state.should_fail_radio {
            return Err(AdapterError::RadioControl("Mock radio failure".into()));
        }
        state.radio_requests.push(enabled);
        if !(enabled && state.radio_stuck_off) {
            state.radio_enabled = enabled;
        }
        Ok(true)
    }

    async fn start_scan(&self) -> AdapterResult<()> {
        let mut state = self.inner.lock().await;
        if state.should_fail_scan {
            Err(AdapterError::ScanFailed("Mock scan failure".into()))
        } else {
            state.scans_started += 1;
            Ok(())
        }
    }

    async fn scan_results(&self) -> AdapterResult<Vec<ScanRecord>> {
        let state = self.inner.lock().await;
        if state.should_fail_scan_results {
            Err(AdapterError::ScanFailed("Mock scan results failure".into()))
        } else {
            Ok(state.scan_records.clone())
        }
    }

    async fn configured_profiles(&self) -> AdapterResult<Vec<NetworkProfile>> {
        let state = self.inner.lock().await;
        if state.should_fail_profile_store {
            Err(AdapterError::ProfileStore("Mock store failure".into()))
        } else {
            Ok(state.profiles.clone())
        }
    }

    async fn add_profile(&self, descriptor: ProfileDescriptor) -> AdapterResult<i32> {
        let mut state = self.inner.lock().await;
        if state.should_fail_profile_store {
            return Err(AdapterError::ProfileStore("Mock store failure".into()));
        }
        let network_id = state.next_network_id;
        state.next_network_id += 1;
        state.profiles.push(NetworkProfile {
            ssid: descriptor.ssid.clone(),
            bssid: None,
            network_id,
            status: ProfileStatus::Disabled,
        });
        state.added_profiles.push(descriptor);
        Ok(network_id)
    }

    async fn enable_profile(&self, network_id: i32, exclusive: bool) -> AdapterResult<bool> {
        let mut state = self.inner.lock().await;
        if state.should_fail_profile_store {
            return Err(AdapterError::ProfileStore("Mock store failure".into()));
        }
        state.enable_calls.push((network_id, exclusive));
        if state.enable_accepted {
            for profile in &mut state.profiles {
                if profile.network_id == network_id {
                    profile.status = ProfileStatus::Enabled;
                } else if exclusive {
                    profile.status = ProfileStatus::Disabled;
                }
            }
        }
        Ok(state.enable_accepted)
    }

    async fn disable_profile(&self, network_id: i32) -> AdapterResult<()> {
        let mut state = self.inner.lock().await;
        if state.should_fail_profile_store {
            return Err(AdapterError::ProfileStore("Mock store failure".into()));
        }
        state.disable_calls.push(network_id);
        if let Some(profile) = state
            .profiles
            .iter_mut()
            .find(|profile| profile.network_id == network_id)
        {
            profile.status = ProfileStatus::Disabled;
        }
        if state
            .association
            .as_ref()
            .is_some_and(|association| association.network_id == network_id)
        {
            state.association = None;
        }
        Ok(())
    }

    async fn current_association(&self) -> AdapterResult<Option<Association>> {
        let state = self.inner.lock().await;
        if state.should_fail_association {
            Err(AdapterError::Unavailable("Mock association failure".into()))
        } else {
            Ok(state.association.clone())
        }
    }
}
