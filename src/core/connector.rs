//! Connection orchestration: the staged association sequence

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::{
    adapter::WifiAdapter,
    config::Settings,
    core::{
        dispatch::{Delivery, DeliverySender, notify_listener},
        error::AdapterResult,
        security,
        types::{CipherScheme, ConnectOutcome, ConnectionRequest, quoted},
    },
};

/// Occupancy of the single background attempt slot
#[derive(Debug)]
struct AttemptSlot {
    in_flight: bool,
}

impl AttemptSlot {
    fn new() -> Self {
        Self { in_flight: false }
    }

    /// Claim the slot; `false` when another attempt holds it
    fn claim(&mut self) -> bool {
        if self.in_flight {
            false
        } else {
            self.in_flight = true;
            true
        }
    }

    fn release(&mut self) {
        self.in_flight = false;
    }
}

/// Runs connection attempts as background tasks
///
/// At most one attempt is in flight per orchestrator; requests arriving
/// while the slot is held are rejected with a busy outcome on the calling
/// task. Terminal outcomes of accepted attempts are queued for the
/// [`OutcomeDispatcher`](crate::core::dispatch::OutcomeDispatcher).
pub struct ConnectionOrchestrator<A: WifiAdapter> {
    adapter: Arc<A>,
    settings: Settings,
    slot: Arc<RwLock<AttemptSlot>>,
    outcomes: DeliverySender,
}

impl<A: WifiAdapter> ConnectionOrchestrator<A> {
    pub(crate) fn new(adapter: Arc<A>, settings: Settings, outcomes: DeliverySender) -> Self {
        Self {
            adapter,
            settings,
            slot: Arc::new(RwLock::new(AttemptSlot::new())),
            outcomes,
        }
    }

    /// Start one background connection attempt
    ///
    /// The request's listener receives exactly one outcome: a busy
    /// rejection immediately on this task, or the attempt's terminal
    /// outcome through the dispatcher.
    ///
    /// # Panics
    ///
    /// Panics if the request's SSID is empty.
    pub async fn connect(&self, request: ConnectionRequest) {
        assert!(
            !request.ssid.is_empty(),
            "connect requires a non-empty ssid"
        );

        // Claim before spawning so a caller issuing two connects back to
        // back observes the rejection deterministically.
        if !self.slot.write().await.claim() {
            info!(ssid = %request.ssid, "rejecting connect, another attempt is in flight");
            notify_listener(
                request.listener.as_ref(),
                &ConnectOutcome::busy("connect already in progress"),
            );
            return;
        }

        info!(
            ssid = %request.ssid,
            password_set = request.password.is_some(),
            cipher_override = ?request.cipher_override,
            "starting connection attempt"
        );

        let adapter = self.adapter.clone();
        let settings = self.settings.clone();
        let slot = self.slot.clone();
        let outcomes = self.outcomes.clone();

        tokio::spawn(async move {
            let ConnectionRequest {
                ssid,
                password,
                cipher_override,
                listener,
            } = request;

            let outcome = match run_sequence(
                adapter.as_ref(),
                &settings,
                &ssid,
                password.as_deref(),
                cipher_override,
            )
            .await
            {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(ssid = %ssid, error = %e, "adapter fault during connection attempt");
                    ConnectOutcome::failed("connect failed")
                }
            };

            info!(ssid = %ssid, code = ?outcome.code, "connection attempt finished");
            slot.write().await.release();

            if outcomes.send(Delivery { outcome, listener }).is_err() {
                warn!(ssid = %ssid, "outcome dispatcher dropped, discarding connect outcome");
            }
        });
    }
}

/// Drive the adapter through the staged sequence and produce the attempt's
/// terminal outcome
///
/// Adapter faults bubble to the caller, which downgrades them to a generic
/// failed outcome.
async fn run_sequence<A: WifiAdapter>(
    adapter: &A,
    settings: &Settings,
    ssid: &str,
    password: Option<&str>,
    cipher_override: Option<CipherScheme>,
) -> AdapterResult<ConnectOutcome> {
    // The platform acknowledges an enable request before the radio is up,
    // so a settle wait stands in for a completion signal.
    if !adapter.radio_enabled().await? {
        adapter.set_radio_enabled(true).await?;
        tokio::time::sleep(settings.radio_settle).await;
        if !adapter.radio_enabled().await? {
            return Ok(ConnectOutcome::radio_disabled("radio not enabled"));
        }
    }

    adapter.start_scan().await?;
    tokio::time::sleep(settings.scan_settle).await;

    let records = adapter.scan_results().await?;
    debug!(count = records.len(), "scan results read");
    if !records.iter().any(|record| record.ssid == ssid) {
        return Ok(ConnectOutcome::not_found(format!(
            "network {ssid} not found"
        )));
    }

    let scheme = match cipher_override {
        Some(scheme) => scheme,
        // Re-reads the scan state rather than reusing the membership pass,
        // so the scheme reflects whatever the radio reports now.
        None => probe_scheme(adapter, ssid).await?,
    };
    debug!(?scheme, "resolved security scheme");

    let profiles = adapter.configured_profiles().await?;
    for profile in &profiles {
        adapter.disable_profile(profile.network_id).await?;
    }

    let target = quoted(ssid);
    let enabled = match profiles.iter().find(|profile| profile.ssid == target) {
        Some(saved) => {
            debug!(network_id = saved.network_id, "re-enabling saved profile");
            adapter.enable_profile(saved.network_id, true).await?
        }
        None => {
            let descriptor = security::compose_profile(ssid, password, scheme);
            let network_id = adapter.add_profile(descriptor).await?;
            debug!(network_id, "added new profile");
            adapter.enable_profile(network_id, true).await?
        }
    };

    Ok(if enabled {
        ConnectOutcome::success("connected")
    } else {
        ConnectOutcome::failed("connect failed")
    })
}

/// Find the target network in the current scan state and classify it
///
/// Networks not present classify as [`CipherScheme::Invalid`].
pub(crate) async fn probe_scheme<A: WifiAdapter>(
    adapter: &A,
    ssid: &str,
) -> AdapterResult<CipherScheme> {
    let records = adapter.scan_results().await?;
    Ok(records
        .iter()
        .find(|record| record.ssid == ssid)
        .map(security::classify)
        .unwrap_or(CipherScheme::Invalid))
}
