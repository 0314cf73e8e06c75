// Host facility queries: names, resolution, adapters, OS descriptor

mod linux;

use std::net::{IpAddr, ToSocketAddrs};

use if_addrs::IfAddr;
use sysinfo::{Networks, System};
use tracing::instrument;

use crate::error::{Lookup, LookupError};
use crate::models::{AdapterConfig, OsDescriptor};

/// The host facilities a snapshot is built from.
///
/// Every method performs a live query. An empty collection means "no
/// matching record"; an `Err` means the facility itself failed.
pub trait SystemProbe: Send + Sync {
    /// OS-provided machine identifier.
    fn machine_name(&self) -> Result<String, LookupError>;

    /// Name handed to the resolver for address lookups.
    fn host_name(&self) -> Result<String, LookupError>;

    /// Addresses for `host`, in resolver order.
    fn resolve_host(&self, host: &str) -> Result<Vec<IpAddr>, LookupError>;

    /// IP-enabled adapter configurations, in enumeration order.
    fn adapter_configs(&self) -> Result<Vec<AdapterConfig>, LookupError>;

    /// Operating-system descriptor records, in enumeration order.
    fn os_descriptors(&self) -> Result<Vec<OsDescriptor>, LookupError>;
}

/// Queries the machine the process runs on.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiveProbe;

impl LiveProbe {
    pub fn new() -> Self {
        Self
    }
}

impl SystemProbe for LiveProbe {
    #[instrument(skip(self), fields(probe = "live", operation = "machine_name"))]
    fn machine_name(&self) -> Result<String, LookupError> {
        System::host_name()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                LookupError::invalid_record(Lookup::MachineName, "OS reported no machine name")
            })
    }

    #[instrument(skip(self), fields(probe = "live", operation = "host_name"))]
    fn host_name(&self) -> Result<String, LookupError> {
        let name = hostname::get().map_err(|e| LookupError::unavailable(Lookup::Ipv4, e))?;
        name.into_string().map_err(|raw| {
            LookupError::invalid_record(
                Lookup::Ipv4,
                format!("host name is not valid UTF-8: {:?}", raw),
            )
        })
    }

    #[instrument(skip(self), fields(probe = "live", operation = "resolve_host"))]
    fn resolve_host(&self, host: &str) -> Result<Vec<IpAddr>, LookupError> {
        let addrs = (host, 0u16)
            .to_socket_addrs()
            .map_err(|e| LookupError::unavailable(Lookup::Ipv4, e))?;
        let addrs: Vec<IpAddr> = addrs.map(|a| a.ip()).collect();
        tracing::debug!(host, count = addrs.len(), "host resolved");
        Ok(addrs)
    }

    #[instrument(skip(self), fields(probe = "live", operation = "adapter_configs"))]
    fn adapter_configs(&self) -> Result<Vec<AdapterConfig>, LookupError> {
        let interfaces =
            if_addrs::get_if_addrs().map_err(|e| LookupError::unavailable(Lookup::MacAddress, e))?;
        let networks = Networks::new_with_refreshed_list();

        let entries = interfaces.into_iter().map(|iface| match iface.addr {
            IfAddr::V4(v4) => (iface.name, IpAddr::V4(v4.ip), IpAddr::V4(v4.netmask)),
            IfAddr::V6(v6) => (iface.name, IpAddr::V6(v6.ip), IpAddr::V6(v6.netmask)),
        });
        let adapters = group_adapters(entries, |name| {
            let reported = networks
                .list()
                .get(name)
                .map(|data| data.mac_address().to_string());
            preferred_mac(reported, || linux::read_sysfs_mac(name))
        });

        tracing::debug!(count = adapters.len(), "adapter configurations enumerated");
        Ok(adapters)
    }

    #[instrument(skip(self), fields(probe = "live", operation = "os_descriptors"))]
    fn os_descriptors(&self) -> Result<Vec<OsDescriptor>, LookupError> {
        let os_release = linux::read_os_release()
            .map_err(|e| LookupError::unavailable(Lookup::OperatingSystem, e))?;

        let caption = os_release
            .as_deref()
            .and_then(|content| linux::os_release_value(content, "PRETTY_NAME"))
            .or_else(|| non_empty(System::long_os_version()))
            .or_else(|| non_empty(System::name()));
        let manufacturer = os_release
            .as_deref()
            .and_then(|content| linux::os_release_value(content, "NAME"))
            .or_else(|| platform_vendor().map(str::to_string));

        Ok(vec![OsDescriptor {
            caption,
            architecture: non_empty(System::cpu_arch()),
            manufacturer,
        }])
    }
}

/// Folds `(interface, address, netmask)` entries into adapter records.
///
/// Adapters keep first-seen order and loopback addresses are skipped. Subnet
/// entries list IPv4 dotted masks first, then IPv6 prefix lengths.
fn group_adapters<I, F>(entries: I, mac_of: F) -> Vec<AdapterConfig>
where
    I: IntoIterator<Item = (String, IpAddr, IpAddr)>,
    F: Fn(&str) -> Option<String>,
{
    // (name, v4 masks, v6 prefix lengths)
    let mut grouped: Vec<(String, Vec<String>, Vec<String>)> = Vec::new();
    for (name, ip, netmask) in entries {
        if ip.is_loopback() {
            continue;
        }
        let idx = match grouped.iter().position(|(n, _, _)| *n == name) {
            Some(idx) => idx,
            None => {
                grouped.push((name, Vec::new(), Vec::new()));
                grouped.len() - 1
            }
        };
        let entry = &mut grouped[idx];
        match netmask {
            IpAddr::V4(mask) => entry.1.push(mask.to_string()),
            IpAddr::V6(mask) => entry.2.push(u128::from(mask).count_ones().to_string()),
        }
    }

    grouped
        .into_iter()
        .map(|(name, v4_masks, v6_prefixes)| {
            let mac_address = mac_of(&name);
            let mut subnets = v4_masks;
            subnets.extend(v6_prefixes);
            AdapterConfig {
                name,
                mac_address,
                subnets,
            }
        })
        .collect()
}

/// Normalized reported MAC, else whatever `fallback` finds.
fn preferred_mac<F>(reported: Option<String>, fallback: F) -> Option<String>
where
    F: FnOnce() -> Option<String>,
{
    reported
        .and_then(|mac| linux::normalize_mac(&mac))
        .or_else(fallback)
}

/// Accepts both `String` and `Option<String>` answers from sysinfo.
fn non_empty(value: impl Into<Option<String>>) -> Option<String> {
    value
        .into()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != "unknown")
}

fn platform_vendor() -> Option<&'static str> {
    if cfg!(target_os = "windows") {
        Some("Microsoft Corporation")
    } else if cfg!(any(target_os = "macos", target_os = "ios")) {
        Some("Apple Inc.")
    } else {
        None
    }
}
