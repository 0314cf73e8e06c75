// Records reported by the host facilities

use serde::{Deserialize, Serialize};

/// An IP-enabled network adapter configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterConfig {
    pub name: String,
    /// `AA:BB:CC:DD:EE:FF`, or `None` when the adapter reports no hardware address.
    pub mac_address: Option<String>,
    /// IPv4 netmasks (dotted) first, then IPv6 prefix lengths.
    pub subnets: Vec<String>,
}

/// One operating-system descriptor record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OsDescriptor {
    pub caption: Option<String>,
    pub architecture: Option<String>,
    pub manufacturer: Option<String>,
}
