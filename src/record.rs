//! Caller-owned channel records
//!
//! A [`ChannelRecord`] is the per-channel read demand plus its mutable
//! result slot. The engine never allocates or frees records; it only
//! writes the result surface (value + status + timestamp) in place. On
//! completion every record carries either a successful value with a
//! timestamp, or a failure message with a timestamp - never neither.

use std::time::{SystemTime, UNIX_EPOCH};

/// Declared value type of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Boolean,
    Integer,
    Long,
    Float,
    Double,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Boolean => "BOOLEAN",
            DataType::Integer => "INTEGER",
            DataType::Long => "LONG",
            DataType::Float => "FLOAT",
            DataType::Double => "DOUBLE",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a read on one channel
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChannelStatus {
    /// No read has completed yet
    #[default]
    Pending,
    /// Value and timestamp are set
    Success,
    /// Failure message and timestamp are set
    Failure(String),
}

impl ChannelStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ChannelStatus::Success)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ChannelStatus::Failure(_))
    }

    /// Failure message, if this status is a failure
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            ChannelStatus::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// Per-channel read configuration and result slot
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelRecord {
    name: String,
    resource: String,
    value_type: DataType,
    value: Option<f32>,
    status: ChannelStatus,
    timestamp_ms: Option<u64>,
}

impl ChannelRecord {
    /// Create a read record for a float-valued channel
    pub fn new(name: impl Into<String>, resource: impl Into<String>) -> Self {
        Self::with_value_type(name, resource, DataType::Float)
    }

    /// Create a record with an explicit declared value type
    pub fn with_value_type(
        name: impl Into<String>,
        resource: impl Into<String>,
        value_type: DataType,
    ) -> Self {
        Self {
            name: name.into(),
            resource: resource.into(),
            value_type,
            value: None,
            status: ChannelStatus::Pending,
            timestamp_ms: None,
        }
    }

    /// Channel name, as configured by the caller
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configured resource identifier (resolved at build time)
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Declared value type
    pub fn value_type(&self) -> DataType {
        self.value_type
    }

    /// Last read value, if any read succeeded
    pub fn value(&self) -> Option<f32> {
        self.value
    }

    /// Current result status
    pub fn status(&self) -> &ChannelStatus {
        &self.status
    }

    /// Timestamp of the last completed read, in ms since the epoch
    pub fn timestamp_ms(&self) -> Option<u64> {
        self.timestamp_ms
    }

    /// Record a successful read
    pub(crate) fn set_success(&mut self, value: f32, timestamp_ms: u64) {
        self.value = Some(value);
        self.status = ChannelStatus::Success;
        self.timestamp_ms = Some(timestamp_ms);
    }

    /// Record a failed read; the previous value is kept for staleness
    /// inspection but the status marks it unusable
    pub(crate) fn set_failure(&mut self, message: impl Into<String>, timestamp_ms: u64) {
        self.status = ChannelStatus::Failure(message.into());
        self.timestamp_ms = Some(timestamp_ms);
    }
}

/// Current wall-clock time in ms since the epoch
pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
