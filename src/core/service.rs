//! Main wireless association service facade

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    adapter::WifiAdapter,
    config::Settings,
    core::{
        connector::{ConnectionOrchestrator, probe_scheme},
        dispatch::{OutcomeDispatcher, notify_listener},
        error::ServiceResult,
        listener::{ConnectListener, DisconnectListener},
        types::{
            CipherScheme, ConnectOutcome, ConnectionRequest, NetworkProfile, ProfileStatus,
            ScanRecord, quoted, strip_quotes,
        },
    },
};

/// Main wireless association service facade
///
/// One instance is constructed per radio and shared by reference across
/// the host. It owns the adapter handle and delegates connection attempts
/// to the background orchestrator; everything else is a thin, synchronous
/// veneer over the adapter.
///
/// [`new`](Self::new) also returns the [`OutcomeDispatcher`] that delivers
/// terminal connect outcomes. The host must drive it, typically by
/// spawning [`OutcomeDispatcher::run`] on the context its listeners are
/// allowed to run on; until then, outcomes queue up undelivered.
pub struct WifiAssociationService<A: WifiAdapter> {
    adapter: Arc<A>,
    orchestrator: ConnectionOrchestrator<A>,
}

impl<A: WifiAdapter> WifiAssociationService<A> {
    /// Create the service and the dispatcher for its connect outcomes
    pub fn new(adapter: Arc<A>, settings: Settings) -> (Self, OutcomeDispatcher) {
        let (tx, rx) = mpsc::unbounded_channel();
        let orchestrator = ConnectionOrchestrator::new(adapter.clone(), settings, tx);

        (
            Self {
                adapter,
                orchestrator,
            },
            OutcomeDispatcher::new(rx),
        )
    }

    /// Trigger a fresh platform scan
    pub async fn scan(&self) -> ServiceResult<()> {
        self.adapter.start_scan().await?;
        Ok(())
    }

    /// Latest scan records; empty when the platform withholds results
    pub async fn scan_results(&self) -> ServiceResult<Vec<ScanRecord>> {
        Ok(self.adapter.scan_results().await?)
    }

    /// Whether the device is currently associated to `ssid`
    pub async fn is_connected(&self, ssid: &str) -> ServiceResult<bool> {
        let target = quoted(ssid);
        Ok(self
            .adapter
            .current_association()
            .await?
            .is_some_and(|association| association.ssid == target))
    }

    /// Start a connection attempt to `ssid`
    ///
    /// If the device is already associated to `ssid`, the listener's
    /// success callback fires on the calling task and nothing else happens.
    /// Otherwise the attempt runs in the background and its terminal
    /// outcome reaches the listener through the dispatcher. Either way the
    /// listener is invoked exactly once.
    ///
    /// # Panics
    ///
    /// Panics if `ssid` is empty.
    pub async fn connect(
        &self,
        ssid: &str,
        password: Option<&str>,
        cipher_override: Option<CipherScheme>,
        listener: Arc<dyn ConnectListener>,
    ) {
        assert!(!ssid.is_empty(), "connect requires a non-empty ssid");

        // A probe fault reads as "not connected" so the request still
        // resolves through the full attempt below.
        match self.is_connected(ssid).await {
            Ok(true) => {
                info!(ssid = %ssid, "already connected, completing immediately");
                notify_listener(
                    listener.as_ref(),
                    &ConnectOutcome::success("already connected"),
                );
                return;
            }
            Ok(false) => {}
            Err(e) => {
                debug!(
                    ssid = %ssid,
                    error = %e,
                    "association probe failed, proceeding with attempt"
                );
            }
        }

        self.orchestrator
            .connect(ConnectionRequest {
                ssid: ssid.to_string(),
                password: password.map(str::to_string),
                cipher_override,
                listener,
            })
            .await;
    }

    /// Disconnect from `ssid`
    ///
    /// Synchronous: the listener fires before this method returns. Only
    /// the network currently associated can be disconnected; anything else
    /// is reported as a failure without touching the profile store.
    pub async fn disconnect(&self, ssid: &str, listener: &dyn DisconnectListener) {
        if ssid.is_empty() {
            listener.on_disconnect_fail("ssid required");
            return;
        }

        let target = quoted(ssid);
        let association = match self.adapter.current_association().await {
            Ok(association) => association,
            Err(e) => {
                warn!(ssid = %ssid, error = %e, "association lookup failed during disconnect");
                None
            }
        };

        match association {
            Some(association) if association.ssid == target => {
                match self.adapter.disable_profile(association.network_id).await {
                    Ok(()) => {
                        info!(ssid = %ssid, network_id = association.network_id, "disconnected");
                        listener.on_disconnect_success();
                    }
                    Err(e) => {
                        warn!(ssid = %ssid, error = %e, "disable failed during disconnect");
                        listener.on_disconnect_fail("failed to disable the associated profile");
                    }
                }
            }
            _ => listener.on_disconnect_fail("not currently connected to this network"),
        }
    }

    /// Whether the radio is reported enabled
    pub async fn is_radio_enabled(&self) -> ServiceResult<bool> {
        Ok(self.adapter.radio_enabled().await?)
    }

    /// Request the radio on or off; already in the requested state is a
    /// no-op success
    pub async fn set_radio_enabled(&self, enabled: bool) -> ServiceResult<bool> {
        if self.adapter.radio_enabled().await? == enabled {
            return Ok(true);
        }
        Ok(self.adapter.set_radio_enabled(enabled).await?)
    }

    /// SSID of the current association, store quoting stripped
    ///
    /// Falls back to the store's current-status entry for platforms that
    /// expose no live association surface.
    pub async fn current_ssid(&self) -> ServiceResult<Option<String>> {
        if let Some(association) = self.adapter.current_association().await? {
            return Ok(Some(strip_quotes(&association.ssid).to_string()));
        }

        Ok(self
            .current_profile()
            .await?
            .map(|profile| strip_quotes(&profile.ssid).to_string()))
    }

    /// BSSID of the current association, with the same fallback as
    /// [`current_ssid`](Self::current_ssid)
    pub async fn current_bssid(&self) -> ServiceResult<Option<String>> {
        if let Some(association) = self.adapter.current_association().await? {
            return Ok(Some(association.bssid));
        }

        Ok(self.current_profile().await?.and_then(|profile| profile.bssid))
    }

    /// Saved profiles; empty when the platform withholds the listing
    pub async fn configured_profiles(&self) -> ServiceResult<Vec<NetworkProfile>> {
        Ok(self.adapter.configured_profiles().await?)
    }

    /// Security scheme `ssid` advertises in the current scan state
    ///
    /// [`CipherScheme::Invalid`] when the network is not visible.
    pub async fn cipher_scheme_for(&self, ssid: &str) -> ServiceResult<CipherScheme> {
        Ok(probe_scheme(self.adapter.as_ref(), ssid).await?)
    }

    async fn current_profile(&self) -> ServiceResult<Option<NetworkProfile>> {
        Ok(self
            .adapter
            .configured_profiles()
            .await?
            .into_iter()
            .find(|profile| profile.status == ProfileStatus::Current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio_test::assert_ok;

    use std::time::Duration;

    use crate::adapter::MockWifiAdapter;
    use crate::core::listener::test_support::{
        ConnectEvent, DisconnectEvent, RecordingConnectListener, RecordingDisconnectListener,
    };
    use crate::core::types::{Association, ConnectCode};

    fn test_settings() -> Settings {
        Settings::new(Duration::from_millis(1), Duration::from_millis(1))
    }

    fn record(ssid: &str, capabilities: &str) -> ScanRecord {
        ScanRecord {
            ssid: ssid.to_string(),
            bssid: "aa:bb:cc:dd:ee:ff".to_string(),
            capabilities: capabilities.to_string(),
            channel: 6,
            rssi: -55,
        }
    }

    fn association(ssid: &str, network_id: i32) -> Association {
        Association {
            ssid: ssid.to_string(),
            bssid: "aa:bb:cc:dd:ee:ff".to_string(),
            network_id,
        }
    }

    #[tokio::test]
    async fn test_scan_and_results_pass_through_to_the_adapter() {
        let adapter = Arc::new(MockWifiAdapter::new());
        adapter
            .set_scan_records(vec![record("HomeNet", "[WPA2-PSK-CCMP][ESS]")])
            .await;

        let (service, _dispatcher) = WifiAssociationService::new(adapter.clone(), test_settings());

        assert_ok!(service.scan().await);
        assert_eq!(adapter.scans_started().await, 1);

        let results = service.scan_results().await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].ssid, "HomeNet");
    }

    #[tokio::test]
    async fn test_is_connected_compares_against_the_quoted_association() {
        let adapter = Arc::new(MockWifiAdapter::new());
        adapter.set_association(Some(association("\"HomeNet\"", 4))).await;

        let (service, _dispatcher) = WifiAssociationService::new(adapter, test_settings());

        assert!(service.is_connected("HomeNet").await.unwrap());
        assert!(!service.is_connected("Neighbor").await.unwrap());
    }

    #[tokio::test]
    async fn test_connect_completes_synchronously_when_already_associated() {
        let adapter = Arc::new(MockWifiAdapter::new());
        adapter.set_association(Some(association("\"HomeNet\"", 4))).await;

        let (service, _dispatcher) = WifiAssociationService::new(adapter.clone(), test_settings());
        let listener = Arc::new(RecordingConnectListener::default());

        service
            .connect("HomeNet", Some("secret123"), None, listener.clone())
            .await;
        assert_eq!(listener.events(), vec![ConnectEvent::Success]);

        // Repeating the call is equally cheap and side-effect free
        service
            .connect("HomeNet", Some("secret123"), None, listener.clone())
            .await;
        assert_eq!(
            listener.events(),
            vec![ConnectEvent::Success, ConnectEvent::Success]
        );

        assert_eq!(adapter.scans_started().await, 0);
        assert_eq!(adapter.added_profiles().await.len(), 0);
        assert_eq!(adapter.enable_calls().await.len(), 0);
        assert_eq!(adapter.disable_calls().await.len(), 0);
    }

    #[tokio::test]
    async fn test_connect_delivers_success_through_the_dispatcher() {
        let adapter = Arc::new(MockWifiAdapter::new());
        adapter
            .set_scan_records(vec![record("HomeNet", "[WPA2-PSK-CCMP][ESS]")])
            .await;

        let (service, mut dispatcher) =
            WifiAssociationService::new(adapter.clone(), test_settings());
        let listener = Arc::new(RecordingConnectListener::default());

        service
            .connect("HomeNet", Some("secret123"), None, listener.clone())
            .await;
        assert_eq!(listener.events(), vec![]);

        assert!(dispatcher.dispatch_next().await);
        assert_eq!(listener.events(), vec![ConnectEvent::Success]);

        let added = adapter.added_profiles().await;
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].ssid, "\"HomeNet\"");
        assert_eq!(added[0].scheme, CipherScheme::Wpa2);
        assert_eq!(added[0].psk, Some("\"secret123\"".to_string()));
        assert_eq!(adapter.enable_calls().await, vec![(1, true)]);
    }

    #[tokio::test]
    async fn test_connect_outcomes_flow_through_a_spawned_dispatcher() {
        let adapter = Arc::new(MockWifiAdapter::new());
        adapter
            .set_scan_records(vec![record("HomeNet", "[WPA2-PSK-CCMP][ESS]")])
            .await;

        let (service, dispatcher) = WifiAssociationService::new(adapter, test_settings());
        tokio::spawn(dispatcher.run());

        let listener = Arc::new(RecordingConnectListener::default());
        service
            .connect("HomeNet", Some("secret123"), None, listener.clone())
            .await;

        // Give the attempt and the dispatcher time to finish
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(listener.events(), vec![ConnectEvent::Success]);
    }

    #[tokio::test]
    async fn test_connect_reports_radio_disabled_when_the_radio_stays_down() {
        let adapter = Arc::new(MockWifiAdapter::new());
        adapter.set_radio_stuck_off(true).await;

        let (service, mut dispatcher) =
            WifiAssociationService::new(adapter.clone(), test_settings());
        let listener = Arc::new(RecordingConnectListener::default());

        service
            .connect("HomeNet", Some("secret123"), None, listener.clone())
            .await;

        assert!(dispatcher.dispatch_next().await);
        assert_eq!(
            listener.events(),
            vec![ConnectEvent::Fail(
                ConnectCode::RadioDisabled,
                "radio not enabled".to_string()
            )]
        );
        assert_eq!(adapter.scans_started().await, 0);
    }

    #[tokio::test]
    async fn test_connect_reports_not_found_with_the_requested_ssid() {
        let adapter = Arc::new(MockWifiAdapter::new());
        adapter
            .set_scan_records(vec![record("Neighbor", "[WPA2-PSK-CCMP][ESS]")])
            .await;

        let (service, mut dispatcher) = WifiAssociationService::new(adapter, test_settings());
        let listener = Arc::new(RecordingConnectListener::default());

        service
            .connect("HomeNet", Some("secret123"), None, listener.clone())
            .await;

        assert!(dispatcher.dispatch_next().await);
        assert_eq!(
            listener.events(),
            vec![ConnectEvent::Fail(
                ConnectCode::NotFound,
                "network HomeNet not found".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_association_probe_fault_still_runs_the_full_attempt() {
        let adapter = Arc::new(MockWifiAdapter::new());
        adapter.set_association_failure(true).await;
        adapter
            .set_scan_records(vec![record("HomeNet", "[WPA2-PSK-CCMP][ESS]")])
            .await;

        let (service, mut dispatcher) =
            WifiAssociationService::new(adapter.clone(), test_settings());
        let listener = Arc::new(RecordingConnectListener::default());

        service
            .connect("HomeNet", Some("secret123"), None, listener.clone())
            .await;

        assert!(dispatcher.dispatch_next().await);
        assert_eq!(listener.events(), vec![ConnectEvent::Success]);
        assert_eq!(adapter.scans_started().await, 1);
    }

    #[tokio::test]
    #[should_panic(expected = "non-empty ssid")]
    async fn test_connect_with_an_empty_ssid_is_a_caller_bug() {
        let adapter = Arc::new(MockWifiAdapter::new());
        let (service, _dispatcher) = WifiAssociationService::new(adapter, test_settings());

        service
            .connect("", None, None, Arc::new(RecordingConnectListener::default()))
            .await;
    }

    #[tokio::test]
    async fn test_disconnect_requires_an_ssid() {
        let adapter = Arc::new(MockWifiAdapter::new());
        adapter.set_association(Some(association("\"HomeNet\"", 4))).await;

        let (service, _dispatcher) = WifiAssociationService::new(adapter.clone(), test_settings());
        let listener = RecordingDisconnectListener::default();

        service.disconnect("", &listener).await;

        assert_eq!(
            listener.events(),
            vec![DisconnectEvent::Fail("ssid required".to_string())]
        );
        assert_eq!(adapter.disable_calls().await.len(), 0);
    }

    #[tokio::test]
    async fn test_disconnect_disables_the_associated_profile() {
        let adapter = Arc::new(MockWifiAdapter::new());
        adapter.set_association(Some(association("\"HomeNet\"", 4))).await;

        let (service, _dispatcher) = WifiAssociationService::new(adapter.clone(), test_settings());
        let listener = RecordingDisconnectListener::default();

        service.disconnect("HomeNet", &listener).await;

        assert_eq!(listener.events(), vec![DisconnectEvent::Success]);
        assert_eq!(adapter.disable_calls().await, vec![4]);
    }

    #[tokio::test]
    async fn test_disconnect_disable_fault_reports_failure() {
        let adapter = Arc::new(MockWifiAdapter::new());
        adapter.set_association(Some(association("\"HomeNet\"", 4))).await;
        adapter.set_profile_store_failure(true).await;

        let (service, _dispatcher) = WifiAssociationService::new(adapter.clone(), test_settings());
        let listener = RecordingDisconnectListener::default();

        service.disconnect("HomeNet", &listener).await;

        assert_eq!(
            listener.events(),
            vec![DisconnectEvent::Fail(
                "failed to disable the associated profile".to_string()
            )]
        );
        // The association survives the failed disable
        assert!(service.is_connected("HomeNet").await.unwrap());
    }

    #[tokio::test]
    async fn test_disconnect_association_fault_reads_as_not_connected() {
        let adapter = Arc::new(MockWifiAdapter::new());
        adapter.set_association(Some(association("\"HomeNet\"", 4))).await;
        adapter.set_association_failure(true).await;

        let (service, _dispatcher) = WifiAssociationService::new(adapter.clone(), test_settings());
        let listener = RecordingDisconnectListener::default();

        service.disconnect("HomeNet", &listener).await;

        assert_eq!(
            listener.events(),
            vec![DisconnectEvent::Fail(
                "not currently connected to this network".to_string()
            )]
        );
        assert_eq!(adapter.disable_calls().await.len(), 0);
    }

    #[tokio::test]
    async fn test_disconnect_rejects_networks_other_than_the_association() {
        let adapter = Arc::new(MockWifiAdapter::new());
        adapter.set_association(Some(association("\"HomeNet\"", 4))).await;

        let (service, _dispatcher) = WifiAssociationService::new(adapter.clone(), test_settings());
        let listener = RecordingDisconnectListener::default();

        service.disconnect("Neighbor", &listener).await;

        assert_eq!(
            listener.events(),
            vec![DisconnectEvent::Fail(
                "not currently connected to this network".to_string()
            )]
        );
        assert_eq!(adapter.disable_calls().await.len(), 0);
    }

    #[tokio::test]
    async fn test_disconnect_without_any_association_fails() {
        let adapter = Arc::new(MockWifiAdapter::new());
        let (service, _dispatcher) = WifiAssociationService::new(adapter, test_settings());
        let listener = RecordingDisconnectListener::default();

        service.disconnect("HomeNet", &listener).await;

        assert_eq!(
            listener.events(),
            vec![DisconnectEvent::Fail(
                "not currently connected to this network".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_radio_requests_skip_when_already_in_the_requested_state() {
        let adapter = Arc::new(MockWifiAdapter::new());
        let (service, _dispatcher) = WifiAssociationService::new(adapter.clone(), test_settings());

        assert!(service.is_radio_enabled().await.unwrap());
        assert!(service.set_radio_enabled(true).await.unwrap());
        assert_eq!(adapter.radio_requests().await, vec![]);

        assert!(service.set_radio_enabled(false).await.unwrap());
        assert_eq!(adapter.radio_requests().await, vec![false]);
        assert!(!service.is_radio_enabled().await.unwrap());
    }

    #[tokio::test]
    async fn test_current_ssid_prefers_the_live_association() {
        let adapter = Arc::new(MockWifiAdapter::new());
        adapter.set_association(Some(association("\"HomeNet\"", 4))).await;
        adapter
            .set_profiles(vec![NetworkProfile {
                ssid: "\"Office\"".to_string(),
                bssid: Some("11:22:33:44:55:66".to_string()),
                network_id: 7,
                status: ProfileStatus::Current,
            }])
            .await;

        let (service, _dispatcher) = WifiAssociationService::new(adapter, test_settings());

        assert_eq!(
            service.current_ssid().await.unwrap(),
            Some("HomeNet".to_string())
        );
        assert_eq!(
            service.current_bssid().await.unwrap(),
            Some("aa:bb:cc:dd:ee:ff".to_string())
        );
    }

    #[tokio::test]
    async fn test_current_ssid_falls_back_to_the_current_profile() {
        let adapter = Arc::new(MockWifiAdapter::new());
        adapter
            .set_profiles(vec![
                NetworkProfile {
                    ssid: "\"Neighbor\"".to_string(),
                    bssid: None,
                    network_id: 2,
                    status: ProfileStatus::Disabled,
                },
                NetworkProfile {
                    ssid: "\"Office\"".to_string(),
                    bssid: Some("11:22:33:44:55:66".to_string()),
                    network_id: 7,
                    status: ProfileStatus::Current,
                },
            ])
            .await;

        let (service, _dispatcher) = WifiAssociationService::new(adapter, test_settings());

        assert_eq!(
            service.current_ssid().await.unwrap(),
            Some("Office".to_string())
        );
        assert_eq!(
            service.current_bssid().await.unwrap(),
            Some("11:22:33:44:55:66".to_string())
        );
    }

    #[tokio::test]
    async fn test_current_ssid_reports_none_when_unassociated() {
        let adapter = Arc::new(MockWifiAdapter::new());
        let (service, _dispatcher) = WifiAssociationService::new(adapter, test_settings());

        assert_eq!(service.current_ssid().await.unwrap(), None);
        assert_eq!(service.current_bssid().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_cipher_scheme_lookup_classifies_the_visible_network() {
        let adapter = Arc::new(MockWifiAdapter::new());
        adapter
            .set_scan_records(vec![record("HomeNet", "[WPA2-PSK-CCMP][ESS]")])
            .await;

        let (service, _dispatcher) = WifiAssociationService::new(adapter, test_settings());

        assert_eq!(
            service.cipher_scheme_for("HomeNet").await.unwrap(),
            CipherScheme::Wpa2
        );
        assert_eq!(
            service.cipher_scheme_for("Unseen").await.unwrap(),
            CipherScheme::Invalid
        );
    }

    #[tokio::test]
    async fn test_configured_profiles_pass_through_to_the_adapter() {
        let adapter = Arc::new(MockWifiAdapter::new());
        adapter
            .set_profiles(vec![NetworkProfile {
                ssid: "\"Office\"".to_string(),
                bssid: None,
                network_id: 7,
                status: ProfileStatus::Disabled,
            }])
            .await;

        let (service, _dispatcher) = WifiAssociationService::new(adapter, test_settings());

        let profiles = assert_ok!(service.configured_profiles().await);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].network_id, 7);
    }
}
