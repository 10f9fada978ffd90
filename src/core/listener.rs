//! Listener seams for association callbacks

use crate::core::types::ConnectCode;

/// Callbacks for one connection attempt
///
/// Each attempt invokes exactly one of these methods, exactly once.
/// Terminal outcomes of background attempts are delivered through the
/// [`OutcomeDispatcher`](crate::core::dispatch::OutcomeDispatcher); the
/// already-associated shortcut and the busy rejection invoke the listener
/// directly on the calling task.
pub trait ConnectListener: Send + Sync + 'static {
    /// The attempt ended with the device associated to the requested network
    fn on_connect_success(&self);

    /// The attempt ended without association
    fn on_connect_fail(&self, code: ConnectCode, message: &str);
}

/// Callbacks for a disconnect request, always invoked before
/// [`disconnect`](crate::core::service::WifiAssociationService::disconnect)
/// returns
pub trait DisconnectListener {
    fn on_disconnect_success(&self);

    fn on_disconnect_fail(&self, message: &str);
}
