//! Delivery of terminal connection outcomes onto the host's context

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::core::{listener::ConnectListener, types::ConnectOutcome};

/// One queued listener invocation
#[derive(Clone)]
pub(crate) struct Delivery {
    pub(crate) outcome: ConnectOutcome,
    pub(crate) listener: Arc<dyn ConnectListener>,
}

pub(crate) type DeliverySender = mpsc::UnboundedSender<Delivery>;

/// Invoke the listener method matching the outcome code
pub(crate) fn notify_listener(listener: &dyn ConnectListener, outcome: &ConnectOutcome) {
    if outcome.is_success() {
        listener.on_connect_success();
    } else {
        listener.on_connect_fail(outcome.code, &outcome.message);
    }
}

/// Consumer half of the outcome channel
///
/// Background attempts never invoke connect listeners themselves; they
/// queue the terminal outcome here and the host drives delivery from
/// whatever context its listeners must run on. Spawn [`run`](Self::run)
/// as a task, or interleave [`dispatch_next`](Self::dispatch_next) with an
/// existing event loop.
pub struct OutcomeDispatcher {
    rx: mpsc::UnboundedReceiver<Delivery>,
}

impl OutcomeDispatcher {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<Delivery>) -> Self {
        OutcomeDispatcher { rx }
    }

    /// Deliver the next queued outcome, waiting for one if none is pending
    ///
    /// Returns `false` once the producing service has been dropped and all
    /// queued outcomes are delivered.
    pub async fn dispatch_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(delivery) => {
                debug!(
                    code = ?delivery.outcome.code,
                    message = %delivery.outcome.message,
                    "delivering connect outcome"
                );
                notify_listener(delivery.listener.as_ref(), &delivery.outcome);
                true
            }
            None => false,
        }
    }

    /// Deliver outcomes until the producing service is dropped
    pub async fn run(mut self) {
        while self.dispatch_next().await {}
        debug!("outcome channel closed, dispatcher exiting");
    }
}
