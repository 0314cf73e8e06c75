// Record selection rules for each snapshot field.
//
// MAC takes the first adapter, subnet mask the last one. The asymmetry is
// kept as observed in the field; both run over the same adapter set.

use std::net::IpAddr;

use crate::models::{AdapterConfig, OsDescriptor, SENTINEL};

/// Last IPv4 address in resolver order.
pub fn select_last_ipv4(addrs: &[IpAddr]) -> String {
    addrs
        .iter()
        .rev()
        .find(|ip| ip.is_ipv4())
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| SENTINEL.into())
}

/// Last IPv6 address in resolver order.
pub fn select_last_ipv6(addrs: &[IpAddr]) -> String {
    addrs
        .iter()
        .rev()
        .find(|ip| ip.is_ipv6())
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| SENTINEL.into())
}

/// MAC of the first adapter enumerated.
pub fn select_first_mac(adapters: &[AdapterConfig]) -> String {
    adapters
        .first()
        .and_then(|a| a.mac_address.clone())
        .unwrap_or_else(|| SENTINEL.into())
}

/// First subnet entry of the last adapter enumerated.
pub fn select_last_subnet(adapters: &[AdapterConfig]) -> String {
    adapters
        .last()
        .and_then(|a| a.subnets.first().cloned())
        .unwrap_or_else(|| SENTINEL.into())
}

/// Attribute of the last descriptor record enumerated.
pub fn select_last_os_attribute<F>(records: &[OsDescriptor], attribute: F) -> String
where
    F: Fn(&OsDescriptor) -> Option<&String>,
{
    records
        .last()
        .and_then(|r| attribute(r).cloned())
        .unwrap_or_else(|| SENTINEL.into())
}
