//! Domain types for wireless association

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::listener::ConnectListener;

/// A single access point observation from a platform scan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanRecord {
    /// Network SSID as broadcast, without store quoting
    pub ssid: String,
    /// Access point hardware address (BSSID)
    pub bssid: String,
    /// Advertised capability descriptor, e.g. `[WPA2-PSK-CCMP][ESS]`
    pub capabilities: String,
    /// Channel number
    pub channel: u16,
    /// Signal strength in dBm
    pub rssi: i16,
}

/// Security scheme advertised by an access point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CipherScheme {
    Open,
    Wep,
    Wpa,
    Wpa2,
    Wpa3,
    /// No classification possible, e.g. the network is not in scan range
    Invalid,
}

impl CipherScheme {
    /// WPA-family schemes authenticate with a pre-shared passphrase
    pub fn uses_psk(&self) -> bool {
        matches!(
            self,
            CipherScheme::Wpa | CipherScheme::Wpa2 | CipherScheme::Wpa3
        )
    }
}

/// Enablement status of a saved profile in the platform store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ProfileStatus {
    /// The profile backing the live association
    Current = 0,
    Disabled = 1,
    Enabled = 2,
    /// Catch-all for platform states introduced after this mapping
    Unknown = 3,
}

impl From<u8> for ProfileStatus {
    fn from(value: u8) -> Self {
        match value {
            0 => ProfileStatus::Current,
            1 => ProfileStatus::Disabled,
            2 => ProfileStatus::Enabled,
            _ => ProfileStatus::Unknown,
        }
    }
}

impl From<ProfileStatus> for u8 {
    fn from(status: ProfileStatus) -> Self {
        status as u8
    }
}

/// Read-only view of a saved network entry in the platform store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkProfile {
    /// SSID in the store's quoted form, e.g. `"HomeNet"`
    pub ssid: String,
    /// Access point the profile is pinned to, when the store records one
    pub bssid: Option<String>,
    /// Opaque handle for enable and disable calls
    pub network_id: i32,
    /// Enablement status
    pub status: ProfileStatus,
}

/// Write descriptor handed to the adapter when creating a new profile
///
/// Built by [`security::compose_profile`](crate::core::security::compose_profile);
/// exactly one credential field is set for secured schemes, none for open
/// networks.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileDescriptor {
    /// SSID in the store's quoted form
    pub ssid: String,
    /// Scheme the entry is configured for
    pub scheme: CipherScheme,
    /// Quoted passphrase for WPA-family schemes
    pub psk: Option<String>,
    /// WEP key, raw for valid hex keys and quoted otherwise
    pub wep_key: Option<String>,
}

impl std::fmt::Debug for ProfileDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileDescriptor")
            .field("ssid", &self.ssid)
            .field("scheme", &self.scheme)
            .field("psk", &self.psk.as_ref().map(|_| "<redacted>"))
            .field("wep_key", &self.wep_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Live association as reported by the platform
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Association {
    /// SSID in the store's quoted form
    pub ssid: String,
    /// BSSID of the serving access point
    pub bssid: String,
    /// Profile handle backing the association
    pub network_id: i32,
}

/// Stable integer codes delivered with connection outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum ConnectCode {
    Success = 0,
    Failed = -1,
    RadioDisabled = -2,
    NotFound = -3,
    Busy = -4,
}

impl TryFrom<i32> for ConnectCode {
    type Error = ();

    fn try_from(value: i32) -> Result<Self, <Self as TryFrom<i32>>::Error> {
        match value {
            0 => Ok(ConnectCode::Success),
            -1 => Ok(ConnectCode::Failed),
            -2 => Ok(ConnectCode::RadioDisabled),
            -3 => Ok(ConnectCode::NotFound),
            -4 => Ok(ConnectCode::Busy),
            _ => Err(()),
        }
    }
}

impl From<ConnectCode> for i32 {
    fn from(code: ConnectCode) -> Self {
        code as i32
    }
}

/// Terminal result of one connection attempt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectOutcome {
    pub code: ConnectCode,
    pub message: String,
}

impl ConnectOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        ConnectOutcome {
            code: ConnectCode::Success,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        ConnectOutcome {
            code: ConnectCode::Failed,
            message: message.into(),
        }
    }

    pub fn radio_disabled(message: impl Into<String>) -> Self {
        ConnectOutcome {
            code: ConnectCode::RadioDisabled,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ConnectOutcome {
            code: ConnectCode::NotFound,
            message: message.into(),
        }
    }

    pub fn busy(message: impl Into<String>) -> Self {
        ConnectOutcome {
            code: ConnectCode::Busy,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == ConnectCode::Success
    }
}

/// Inputs for one connection attempt
///
/// Built per `connect` call and consumed by the orchestrator; the listener
/// receives exactly one terminal callback for it.
#[derive(Clone)]
pub struct ConnectionRequest {
    /// Target SSID, without store quoting
    pub ssid: String,
    /// Credential for secured networks
    pub password: Option<String>,
    /// Caller-asserted scheme; skips scan-based classification when set
    pub cipher_override: Option<CipherScheme>,
    /// Receiver of the attempt's terminal outcome
    pub listener: Arc<dyn ConnectListener>,
}

impl std::fmt::Debug for ConnectionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionRequest")
            .field("ssid", &self.ssid)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("cipher_override", &self.cipher_override)
            .finish_non_exhaustive()
    }
}

/// Wrap an SSID in the platform store's literal quoting
pub fn quoted(ssid: &str) -> String {
    format!("\"{ssid}\"")
}

/// Strip the store's surrounding quotes, passing unquoted input through
pub fn strip_quotes(ssid: &str) -> &str {
    ssid.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(ssid)
}
