//! Platform adapter abstraction layer

pub mod mock_adapter;
pub mod wifi_adapter;

pub use wifi_adapter::WifiAdapter;

#[cfg(test)]
pub use mock_adapter::MockWifiAdapter;
