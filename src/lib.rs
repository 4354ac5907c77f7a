//! # sensegate - batched device-I/O for fleet gateways
//!
//! A batching layer that services many independent, fine-grained channel
//! reads (one per logical measurement, e.g. "acceleration-X") with a
//! small set of coarse-grained sensor fetches, plus an event-listener
//! registry keyed by logical resource and a replay-based synthetic data
//! source for simulation without real hardware.
//!
//! ## Key properties
//!
//! - **Deduplicated fetch work**: N channels over M sensor groups cost
//!   exactly one replay pull per batch, never M or N
//! - **Per-item degradation**: one unresolvable channel never fails the
//!   rest of its batch
//! - **Infinite replay**: the recorded dataset transparently restarts
//!   when exhausted, so simulations run indefinitely
//! - **Concurrent listeners**: registration and removal are safe while
//!   reads and event dispatch happen on other threads
//!
//! ## Quick start
//!
//! ```rust
//! use sensegate::{ChannelRecord, Engine, EngineConfig};
//!
//! let engine = Engine::new(EngineConfig::default());
//!
//! // One record per logical measurement; the three acceleration axes
//! // and both humidity channels below share two physical fetch groups.
//! let mut records = vec![
//!     ChannelRecord::new("accel-x", "ACCELERATION_X"),
//!     ChannelRecord::new("accel-y", "ACCELERATION_Y"),
//!     ChannelRecord::new("accel-z", "ACCELERATION_Z"),
//!     ChannelRecord::new("cabin-humidity", "HUMIDITY"),
//!     ChannelRecord::new("cargo-humidity", "HUMIDITY"),
//! ];
//!
//! engine.read(&mut records);
//!
//! for record in &records {
//!     assert!(record.status().is_success());
//!     assert!(record.timestamp_ms().is_some());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`resource`]: logical resources and physical sensor groups
//! - [`feed`]: replayable recorded-sample feed with fault injection
//! - [`view`]: last-known-values sensor snapshot
//! - [`request`]: batch job construction (resolve + group)
//! - [`engine`]: serialized two-phase batch execution
//! - [`prepared`]: reusable pre-resolved reads
//! - [`listener`]: resource-keyed channel listener registry

pub mod config;
pub mod engine;
pub mod error;
pub mod feed;
pub mod frame;
pub mod listener;
pub mod prepared;
pub mod record;
pub mod request;
pub mod resource;
pub mod view;

// Re-exports for convenient access
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{EngineError, Result};
pub use feed::DataFeed;
pub use frame::{Frame, FIELD_NAMES};
pub use listener::{ChannelEvent, ChannelListener, ListenerRegistration, ListenerRegistry};
pub use prepared::PreparedRead;
pub use record::{ChannelRecord, ChannelStatus, DataType};
pub use request::{ReadRequest, ReadTask};
pub use resource::{Resource, Sensor};
pub use view::SensorView;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
