// Observable machine snapshot.
// A `MachineSnapshot` is built from eight independent host queries and
// then exposes each answer as a property. Setting a property to a new value
// notifies subscribers with the field's name; setting it to the value it
// already holds does nothing.
// All fields share one lock. A setter compares, stores and notifies while
// holding it, so concurrent setters are serialized and subscribers always
// observe the stored value. The lock is re-entrant: a subscriber may read
// (or set) properties of the same snapshot from inside its callback.

use std::cell::RefCell;
use std::net::IpAddr;
use std::sync::Arc;

use parking_lot::ReentrantMutex;
use tracing::instrument;

use crate::error::{Lookup, LookupError};
use crate::models::{MachineField, MachineInfo, OsDescriptor, PropertyChanged};
use crate::notify::{ChangeSignal, SubscriptionId};
use crate::probe::{LiveProbe, SystemProbe};
use crate::select;

pub struct MachineSnapshot {
    values: ReentrantMutex<RefCell<MachineInfo>>,
    changed: ChangeSignal,
}

impl MachineSnapshot {
    /// Query the local machine. Fails if any single lookup fails.
    pub fn capture() -> Result<Self, LookupError> {
        Self::capture_with(&LiveProbe::new())
    }

    /// Query `probe`. Fails if any single lookup fails.
    #[instrument(skip_all, fields(operation = "capture"))]
    pub fn capture_with(probe: &dyn SystemProbe) -> Result<Self, LookupError> {
        let info = resolve(probe)?;
        tracing::debug!(machine = %info.machine_name, ipv4 = %info.ipv4, "machine snapshot captured");
        Ok(Self::from_info(info))
    }

    /// [`capture`](Self::capture) on the blocking thread pool.
    pub async fn capture_async() -> Result<Self, LookupError> {
        tokio::task::spawn_blocking(Self::capture)
            .await
            .map_err(|e| LookupError::Task(e.to_string()))?
    }

    pub fn from_info(info: MachineInfo) -> Self {
        Self {
            values: ReentrantMutex::new(RefCell::new(info)),
            changed: ChangeSignal::new(),
        }
    }

    /// Consistent copy of all fields.
    pub fn info(&self) -> MachineInfo {
        self.values.lock().borrow().clone()
    }

    pub fn get(&self, field: MachineField) -> String {
        self.values.lock().borrow().get(field).to_string()
    }

    /// Store `value` if it differs from the current one and notify.
    /// Returns whether a notification was emitted.
    pub fn set(&self, field: MachineField, value: impl Into<String>) -> bool {
        let value = value.into();
        let guard = self.values.lock();
        {
            let mut values = guard.borrow_mut();
            let slot = values.slot_mut(field);
            if *slot == value {
                return false;
            }
            *slot = value;
        }
        tracing::debug!(field = %field, "machine field changed");
        self.changed.emit(PropertyChanged { field });
        drop(guard);
        true
    }

    pub fn machine_name(&self) -> String {
        self.get(MachineField::MachineName)
    }

    pub fn operating_system(&self) -> String {
        self.get(MachineField::OperatingSystem)
    }

    pub fn os_architecture(&self) -> String {
        self.get(MachineField::OsArchitecture)
    }

    pub fn os_manufacturer(&self) -> String {
        self.get(MachineField::OsManufacturer)
    }

    pub fn ipv4(&self) -> String {
        self.get(MachineField::Ipv4)
    }

    pub fn ipv6(&self) -> String {
        self.get(MachineField::Ipv6)
    }

    pub fn mac_address(&self) -> String {
        self.get(MachineField::MacAddress)
    }

    pub fn subnet_mask(&self) -> String {
        self.get(MachineField::SubnetMask)
    }

    pub fn set_machine_name(&self, value: impl Into<String>) -> bool {
        self.set(MachineField::MachineName, value)
    }

    pub fn set_operating_system(&self, value: impl Into<String>) -> bool {
        self.set(MachineField::OperatingSystem, value)
    }

    pub fn set_os_architecture(&self, value: impl Into<String>) -> bool {
        self.set(MachineField::OsArchitecture, value)
    }

    pub fn set_os_manufacturer(&self, value: impl Into<String>) -> bool {
        self.set(MachineField::OsManufacturer, value)
    }

    pub fn set_ipv4(&self, value: impl Into<String>) -> bool {
        self.set(MachineField::Ipv4, value)
    }

    pub fn set_ipv6(&self, value: impl Into<String>) -> bool {
        self.set(MachineField::Ipv6, value)
    }

    pub fn set_mac_address(&self, value: impl Into<String>) -> bool {
        self.set(MachineField::MacAddress, value)
    }

    pub fn set_subnet_mask(&self, value: impl Into<String>) -> bool {
        self.set(MachineField::SubnetMask, value)
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&PropertyChanged) + Send + Sync + 'static,
    {
        self.changed.subscribe(callback)
    }

    pub fn subscribe_field<F>(&self, field: MachineField, callback: F) -> SubscriptionId
    where
        F: Fn(&PropertyChanged) + Send + Sync + 'static,
    {
        self.changed.subscribe_field(field, callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.changed.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.changed.subscriber_count()
    }

    /// Re-run every lookup against the local machine.
    pub fn refresh(&self) -> Result<Vec<MachineField>, LookupError> {
        self.refresh_with(&LiveProbe::new())
    }

    /// Re-run every lookup against `probe` and push the answers through the
    /// setters. Nothing is applied unless all lookups succeed. Returns the
    /// fields that changed, in [`MachineField::ALL`] order.
    #[instrument(skip_all, fields(operation = "refresh"))]
    pub fn refresh_with(&self, probe: &dyn SystemProbe) -> Result<Vec<MachineField>, LookupError> {
        let fresh = resolve(probe)?;
        let changed: Vec<MachineField> = self
            .info()
            .diff(&fresh)
            .into_iter()
            .filter(|field| self.set(*field, fresh.get(*field)))
            .collect();
        tracing::debug!(changed = changed.len(), "machine snapshot refreshed");
        Ok(changed)
    }

    /// [`refresh`](Self::refresh) on the blocking thread pool.
    pub async fn refresh_async(self: &Arc<Self>) -> Result<Vec<MachineField>, LookupError> {
        let snapshot = Arc::clone(self);
        tokio::task::spawn_blocking(move || snapshot.refresh())
            .await
            .map_err(|e| LookupError::Task(e.to_string()))?
    }
}

impl std::fmt::Debug for MachineSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MachineSnapshot")
            .field("info", &self.info())
            .field("changed", &self.changed)
            .finish()
    }
}

/// Run the eight lookups in order. Each one queries the host afresh.
pub fn resolve(probe: &dyn SystemProbe) -> Result<MachineInfo, LookupError> {
    let ipv4 = select::select_last_ipv4(&resolved_addresses(probe, Lookup::Ipv4)?);
    let ipv6 = select::select_last_ipv6(&resolved_addresses(probe, Lookup::Ipv6)?);
    let mac_address = select::select_first_mac(
        &probe
            .adapter_configs()
            .map_err(|e| e.for_lookup(Lookup::MacAddress))?,
    );
    let subnet_mask = select::select_last_subnet(
        &probe
            .adapter_configs()
            .map_err(|e| e.for_lookup(Lookup::SubnetMask))?,
    );

    let machine_name = probe
        .machine_name()
        .map_err(|e| e.for_lookup(Lookup::MachineName))?;
    let operating_system = select::select_last_os_attribute(
        &os_records(probe, Lookup::OperatingSystem)?,
        |r| r.caption.as_ref(),
    );
    let os_architecture = select::select_last_os_attribute(
        &os_records(probe, Lookup::OsArchitecture)?,
        |r| r.architecture.as_ref(),
    );
    let os_manufacturer = select::select_last_os_attribute(
        &os_records(probe, Lookup::OsManufacturer)?,
        |r| r.manufacturer.as_ref(),
    );

    Ok(MachineInfo {
        machine_name,
        operating_system,
        os_architecture,
        os_manufacturer,
        ipv4,
        ipv6,
        mac_address,
        subnet_mask,
    })
}

fn resolved_addresses(probe: &dyn SystemProbe, lookup: Lookup) -> Result<Vec<IpAddr>, LookupError> {
    let host = probe.host_name().map_err(|e| e.for_lookup(lookup))?;
    probe.resolve_host(&host).map_err(|e| e.for_lookup(lookup))
}

fn os_records(
    probe: &dyn SystemProbe,
    lookup: Lookup,
) -> Result<Vec<OsDescriptor>, LookupError> {
    probe.os_descriptors().map_err(|e| e.for_lookup(lookup))
}
