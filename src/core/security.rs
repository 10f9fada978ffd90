//! Security scheme classification and profile credential shaping

use crate::core::types::{CipherScheme, ProfileDescriptor, ScanRecord, quoted};

/// Classify a scan record's advertised capabilities
///
/// Markers are matched case-insensitively in priority order: SAE/WPA3
/// first (WPA3 transition-mode descriptors also contain a WPA2 marker),
/// then WPA2/RSN, WPA, WEP. A descriptor with no recognized marker is an
/// open network; a blank descriptor classifies as [`CipherScheme::Invalid`].
pub fn classify(record: &ScanRecord) -> CipherScheme {
    let capabilities = record.capabilities.trim();
    if capabilities.is_empty() {
        return CipherScheme::Invalid;
    }

    let capabilities = capabilities.to_ascii_uppercase();
    if capabilities.contains("SAE") || capabilities.contains("WPA3") {
        CipherScheme::Wpa3
    } else if capabilities.contains("WPA2") || capabilities.contains("RSN") {
        CipherScheme::Wpa2
    } else if capabilities.contains("WPA") {
        CipherScheme::Wpa
    } else if capabilities.contains("WEP") {
        CipherScheme::Wep
    } else {
        CipherScheme::Open
    }
}

/// Build the store entry for a new profile
///
/// The SSID is stored quoted. Open and unclassifiable schemes carry no
/// credential. WEP keys are stored raw when they are valid hex keys and
/// quoted otherwise; WPA-family passphrases are always stored quoted.
pub fn compose_profile(
    ssid: &str,
    password: Option<&str>,
    scheme: CipherScheme,
) -> ProfileDescriptor {
    let mut descriptor = ProfileDescriptor {
        ssid: quoted(ssid),
        scheme,
        psk: None,
        wep_key: None,
    };

    if scheme == CipherScheme::Wep {
        if let Some(key) = password.filter(|key| !key.is_empty()) {
            descriptor.wep_key = Some(if is_hex_wep_key(key) {
                key.to_string()
            } else {
                quoted(key)
            });
        }
    } else if scheme.uses_psk() {
        descriptor.psk = password.map(quoted);
    }

    descriptor
}

/// Whether a WEP key is in raw hex form
///
/// WEP-40, WEP-104 and 256-bit WEP keys are 10, 26 and 58 hex digits.
pub fn is_hex_wep_key(key: &str) -> bool {
    matches!(key.len(), 10 | 26 | 58) && key.chars().all(|c| c.is_ascii_hexdigit())
}
