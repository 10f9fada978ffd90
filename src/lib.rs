//! Wireless Network Association
//!
//! A library for managing wireless connectivity over a host-supplied
//! platform adapter: scanning for access points, classifying advertised
//! security schemes, and orchestrating the multi-step dance of associating
//! to a network.
//!
//! - [`WifiAssociationService`] is the facade; the host constructs one per
//!   radio and shares it by reference.
//! - [`WifiAdapter`] is the capability trait the host implements over its
//!   platform's network management surface.
//! - Terminal connect outcomes are queued for the [`OutcomeDispatcher`],
//!   which the host drives from the context its listeners must run on.

pub mod adapter;
pub mod config;
pub mod core;

pub use adapter::WifiAdapter;
pub use config::Settings;
pub use core::{
    dispatch::OutcomeDispatcher,
    error::{AdapterError, AdapterResult, ServiceError, ServiceResult},
    listener::{ConnectListener, DisconnectListener},
    service::WifiAssociationService,
    types::{
        Association, CipherScheme, ConnectCode, ConnectOutcome, NetworkProfile,
        ProfileDescriptor, ProfileStatus, ScanRecord,
    },
};
