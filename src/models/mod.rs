// Domain models

mod adapter;
mod machine;

pub use adapter::{AdapterConfig, OsDescriptor};
pub use machine::{MachineField, MachineInfo, PropertyChanged, SENTINEL, UnknownField};
