//! The batching engine
//!
//! [`Engine`] owns the replay feed and the sensor snapshot behind one
//! mutex - the engine-wide serialization lock. A batch execution holds
//! that lock for its whole two-phase cycle: exactly one feed pull, one
//! snapshot refresh covering the union of required sensor groups, then
//! the task fan-out writing per-record results. N channels needing the
//! same three sensors cost exactly one fetch, not N.
//!
//! The listener registry lives outside the lock; registration and event
//! dispatch never block batch execution.

use std::sync::{Arc, Mutex, PoisonError};

use log::info;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::feed::DataFeed;
use crate::listener::{ChannelEvent, ChannelListener, ListenerRegistration, ListenerRegistry};
use crate::prepared::PreparedRead;
use crate::record::{now_ms, ChannelRecord};
use crate::request::ReadRequest;
use crate::resource::Resource;
use crate::view::SensorView;

/// Feed and snapshot, guarded together by the serialization lock
struct DeviceIo {
    feed: DataFeed,
    view: SensorView,
}

/// Batched device-I/O engine
///
/// One instance per hosting driver. Construction follows the hosting
/// lifecycle's `initialize`; a configuration change is a drop plus a
/// fresh construction; [`Engine::shutdown`] makes the instance inert.
pub struct Engine {
    io: Mutex<DeviceIo>,
    listeners: ListenerRegistry,
}

impl Engine {
    /// Open the engine with the given configuration
    ///
    /// Always usable immediately: a replay source that cannot be opened
    /// degrades to an inert feed whose reads fail per item, rather than
    /// failing construction.
    pub fn new(config: EngineConfig) -> Self {
        info!("Opening replay device...");
        let feed = DataFeed::open(&config);
        info!("Opening replay device...done");

        Self {
            io: Mutex::new(DeviceIo {
                feed,
                view: SensorView::default(),
            }),
            listeners: ListenerRegistry::new(),
        }
    }

    /// Read a batch of channels
    ///
    /// Resolves the records into a batch job and executes it. On return
    /// every record carries either a value with a timestamp or a failure
    /// message with a timestamp.
    pub fn read(&self, records: &mut [ChannelRecord]) {
        let request = ReadRequest::build(records);
        self.execute_request(&request, records);
    }

    /// Execute an already-built batch job
    ///
    /// `records` must be the list the request was built from; task
    /// indexes bind positionally.
    ///
    /// The whole cycle runs under the serialization lock: one feed pull,
    /// one refresh of exactly the job's required sensors, then the task
    /// fan-out. A per-task accessor failure is converted into the same
    /// per-item failure shape as resolution failures.
    pub fn execute_request(&self, request: &ReadRequest, records: &mut [ChannelRecord]) {
        let mut guard = self.io.lock().unwrap_or_else(PoisonError::into_inner);
        let io = &mut *guard;

        match io.feed.advance() {
            Ok(frame) => {
                io.view.refresh(request.required_sensors(), frame);
                for task in request.tasks() {
                    let timestamp = now_ms();
                    let record = &mut records[task.record_index()];
                    match io.view.value(task.resource()) {
                        Some(value) => record.set_success(value, timestamp),
                        None => record.set_failure(
                            EngineError::NotReadable(task.resource().as_str().to_string())
                                .to_string(),
                            timestamp,
                        ),
                    }
                }
            }
            Err(e) => {
                // Terminal feed failure degrades per item, never panics
                let message = e.to_string();
                for task in request.tasks() {
                    records[task.record_index()].set_failure(message.clone(), now_ms());
                }
            }
        }
    }

    /// Prepare a reusable read over the given records
    ///
    /// Resolution happens once, here; every later
    /// [`PreparedRead::execute`] reuses the resolved task and sensor sets.
    pub fn prepare_read(&self, records: Vec<ChannelRecord>) -> PreparedRead<'_> {
        PreparedRead::new(self, records)
    }

    /// Write a batch of channels
    ///
    /// # Errors
    ///
    /// Always returns [`EngineError::UnsupportedWrite`]; this engine has
    /// no actuation path.
    pub fn write(&self, _records: &mut [ChannelRecord]) -> Result<()> {
        Err(EngineError::UnsupportedWrite)
    }

    /// Register a channel listener from its channel configuration
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::UnknownResource`] for an unresolvable
    /// resource identifier, or [`EngineError::InvalidValueType`] when the
    /// channel's declared value type is not the LONG event type.
    pub fn register_listener(
        &self,
        config: &ChannelRecord,
        listener: Arc<dyn ChannelListener>,
    ) -> Result<()> {
        let resource = Resource::resolve(config.resource())?;
        self.listeners
            .register(resource, listener, config.name(), config.value_type())
    }

    /// Remove a listener from every resource it was registered under
    pub fn unregister_listener(&self, listener: &Arc<dyn ChannelListener>) {
        self.listeners.unregister(listener);
    }

    /// Snapshot of the listeners registered for one resource
    pub fn listeners_for(&self, resource: Resource) -> Vec<ListenerRegistration> {
        self.listeners.listeners_for(resource)
    }

    /// Deliver an event to every listener registered for a resource
    pub fn dispatch_event(&self, resource: Resource, event: &ChannelEvent) -> usize {
        self.listeners.dispatch(resource, event)
    }

    /// Whether the replay feed can still deliver frames
    pub fn is_feed_available(&self) -> bool {
        self.io
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .feed
            .is_available()
    }

    /// Frames delivered since the recording was last (re)opened
    ///
    /// Advances exactly once per batch execution, which makes it the
    /// observable witness that batching deduplicates fetch work.
    pub fn replay_cursor(&self) -> usize {
        self.io
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .feed
            .cursor()
    }

    /// Tear the engine down
    ///
    /// The feed goes inert and all listener registrations are dropped;
    /// later reads fail per item with a feed-unavailable status.
    pub fn shutdown(&self) {
        info!("Closing replay device...");
        self.io
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .feed
            .make_inert("engine shut down".to_string());
        self.listeners.clear();
        info!("Closing replay device...done");
    }
}
