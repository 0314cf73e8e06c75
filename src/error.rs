// Lookup errors

use std::fmt;

/// The eight host queries a snapshot performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup {
    Ipv4,
    Ipv6,
    MacAddress,
    SubnetMask,
    MachineName,
    OperatingSystem,
    OsArchitecture,
    OsManufacturer,
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Lookup::Ipv4 => "ipv4 address",
            Lookup::Ipv6 => "ipv6 address",
            Lookup::MacAddress => "mac address",
            Lookup::SubnetMask => "subnet mask",
            Lookup::MachineName => "machine name",
            Lookup::OperatingSystem => "operating system",
            Lookup::OsArchitecture => "os architecture",
            Lookup::OsManufacturer => "os manufacturer",
        };
        f.write_str(s)
    }
}

/// A host query failed.
///
/// "No matching record" is not an error: probes return empty collections for
/// that and the snapshot stores the `"-"` sentinel.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The host facility behind the query could not be reached or failed.
    #[error("{lookup} lookup failed: {source}")]
    Unavailable {
        lookup: Lookup,
        #[source]
        source: std::io::Error,
    },

    /// The facility answered with data that cannot be used.
    #[error("{lookup} lookup returned an invalid record: {reason}")]
    InvalidRecord { lookup: Lookup, reason: String },

    /// The blocking task running the capture did not complete.
    #[error("snapshot task join: {0}")]
    Task(String),
}

impl LookupError {
    pub fn unavailable(lookup: Lookup, source: std::io::Error) -> Self {
        LookupError::Unavailable { lookup, source }
    }

    pub fn invalid_record(lookup: Lookup, reason: impl Into<String>) -> Self {
        LookupError::InvalidRecord {
            lookup,
            reason: reason.into(),
        }
    }

    /// The query that failed, if the error belongs to one.
    pub fn lookup(&self) -> Option<Lookup> {
        match self {
            LookupError::Unavailable { lookup, .. } | LookupError::InvalidRecord { lookup, .. } => {
                Some(*lookup)
            }
            LookupError::Task(_) => None,
        }
    }

    /// Whether running the same query again may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            LookupError::Unavailable { .. } | LookupError::Task(_) => true,
            LookupError::InvalidRecord { .. } => false,
        }
    }

    /// Re-tag an error raised by a shared query (e.g. host resolution feeds
    /// both address lookups).
    pub(crate) fn for_lookup(self, lookup: Lookup) -> Self {
        match self {
            LookupError::Unavailable { source, .. } => LookupError::Unavailable { lookup, source },
            LookupError::InvalidRecord { reason, .. } => {
                LookupError::InvalidRecord { lookup, reason }
            }
            other => other,
        }
    }
}
