// Library for tests to access modules

pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod probe;
pub mod select;
pub mod snapshot;

pub use error::{Lookup, LookupError};
pub use models::{MachineField, MachineInfo, PropertyChanged, SENTINEL};
pub use notify::SubscriptionId;
pub use snapshot::MachineSnapshot;
