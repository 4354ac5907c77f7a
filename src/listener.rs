//! Resource-keyed channel listener registry
//!
//! Listeners are registered against a logical [`Resource`] and dispatched
//! when the hosting driver fans out asynchronous events. Registration and
//! removal may race event dispatch from other threads, so reads hand out
//! clone-snapshots: iteration never observes a half-mutated set and never
//! blocks batch execution.
//!
//! A registration is identified by listener identity AND channel name
//! together. The same listener may be registered under two channel names
//! for one resource, but registering the identical pair twice is a no-op.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use log::debug;

use crate::error::{EngineError, Result};
use crate::record::DataType;
use crate::resource::Resource;

/// An asynchronous event delivered to channel listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelEvent {
    /// Name of the channel the registration was made under
    pub channel_name: String,
    /// Event payload; event channels carry LONG values
    pub value: i64,
    /// Event time in ms since the epoch
    pub timestamp_ms: u64,
}

/// Receiver for asynchronous channel events
pub trait ChannelListener: Send + Sync {
    fn on_event(&self, event: &ChannelEvent);
}

/// One (listener, channel name) registration
#[derive(Clone)]
pub struct ListenerRegistration {
    listener: Arc<dyn ChannelListener>,
    channel_name: String,
}

impl ListenerRegistration {
    /// Channel name the registration was made under
    pub fn channel_name(&self) -> &str {
        &self.channel_name
    }

    /// The registered listener
    pub fn listener(&self) -> &Arc<dyn ChannelListener> {
        &self.listener
    }

    /// Equality: same listener instance under the same channel name
    fn matches(&self, listener: &Arc<dyn ChannelListener>, channel_name: &str) -> bool {
        Arc::ptr_eq(&self.listener, listener) && self.channel_name == channel_name
    }
}

impl std::fmt::Debug for ListenerRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistration")
            .field("channel_name", &self.channel_name)
            .finish_non_exhaustive()
    }
}

/// Concurrent mapping from resource to registered listeners
#[derive(Default)]
pub struct ListenerRegistry {
    inner: RwLock<HashMap<Resource, Vec<ListenerRegistration>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for a resource
    ///
    /// The per-resource set is created lazily on first registration.
    /// A duplicate (listener, channel name) pair for the same resource is
    /// accepted but not stored twice.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidValueType`] unless the declared value
    /// type is [`DataType::Long`] - event channels carry LONG values only,
    /// checked at registration time rather than at dispatch.
    pub fn register(
        &self,
        resource: Resource,
        listener: Arc<dyn ChannelListener>,
        channel_name: &str,
        value_type: DataType,
    ) -> Result<()> {
        if value_type != DataType::Long {
            return Err(EngineError::InvalidValueType {
                expected: DataType::Long.to_string(),
                actual: value_type.to_string(),
            });
        }

        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let registrations = map.entry(resource).or_default();
        if !registrations
            .iter()
            .any(|r| r.matches(&listener, channel_name))
        {
            debug!("registering listener for {} on {}", channel_name, resource);
            registrations.push(ListenerRegistration {
                listener,
                channel_name: channel_name.to_string(),
            });
        }
        Ok(())
    }

    /// Remove every registration for this listener, across all resources
    pub fn unregister(&self, listener: &Arc<dyn ChannelListener>) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        for registrations in map.values_mut() {
            registrations.retain(|r| !Arc::ptr_eq(&r.listener, listener));
        }
    }

    /// Snapshot of the registrations for one resource
    ///
    /// The returned list is a clone; iterating it is safe while other
    /// threads register or unregister.
    pub fn listeners_for(&self, resource: Resource) -> Vec<ListenerRegistration> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&resource).cloned().unwrap_or_default()
    }

    /// Number of registrations for one resource
    pub fn listener_count(&self, resource: Resource) -> usize {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&resource).map_or(0, Vec::len)
    }

    /// Deliver an event to every listener registered for a resource
    ///
    /// Dispatch runs over a snapshot, so concurrent mutation cannot skip
    /// or double-trigger a listener mid-iteration. Returns the number of
    /// listeners notified.
    pub fn dispatch(&self, resource: Resource, event: &ChannelEvent) -> usize {
        let snapshot = self.listeners_for(resource);
        for registration in &snapshot {
            registration.listener.on_event(event);
        }
        snapshot.len()
    }

    /// Drop every registration; used at engine shutdown
    pub(crate) fn clear(&self) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingListener {
        events: AtomicUsize,
    }

    impl CountingListener {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                events: AtomicUsize::new(0),
            })
        }

        fn count(&self) -> usize {
            self.events.load(Ordering::SeqCst)
        }
    }

    impl ChannelListener for CountingListener {
        fn on_event(&self, _event: &ChannelEvent) {
            self.events.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn event() -> ChannelEvent {
        ChannelEvent {
            channel_name: "stick".to_string(),
            value: 1,
            timestamp_ms: 1000,
        }
    }

    #[test]
    fn test_register_and_dispatch() {
        let registry = ListenerRegistry::new();
        let listener = CountingListener::new();

        registry
            .register(
                Resource::Joystick,
                listener.clone(),
                "stick",
                DataType::Long,
            )
            .unwrap();

        assert_eq!(registry.dispatch(Resource::Joystick, &event()), 1);
        assert_eq!(listener.count(), 1);
    }

    #[test]
    fn test_register_rejects_non_long_type() {
        let registry = ListenerRegistry::new();
        let listener = CountingListener::new();

        let result = registry.register(
            Resource::Joystick,
            listener.clone(),
            "stick",
            DataType::Float,
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidValueType { actual, .. }) if actual == "FLOAT"
        ));
        assert_eq!(registry.listener_count(Resource::Joystick), 0);
    }

    #[test]
    fn test_duplicate_registration_is_not_stored_twice() {
        let registry = ListenerRegistry::new();
        let listener = CountingListener::new();

        for _ in 0..3 {
            registry
                .register(
                    Resource::Joystick,
                    listener.clone(),
                    "stick",
                    DataType::Long,
                )
                .unwrap();
        }
        assert_eq!(registry.listener_count(Resource::Joystick), 1);
        assert_eq!(registry.dispatch(Resource::Joystick, &event()), 1);
    }

    #[test]
    fn test_same_listener_distinct_channel_names_both_persist() {
        let registry = ListenerRegistry::new();
        let listener = CountingListener::new();

        registry
            .register(
                Resource::Joystick,
                listener.clone(),
                "stick-up",
                DataType::Long,
            )
            .unwrap();
        registry
            .register(
                Resource::Joystick,
                listener.clone(),
                "stick-down",
                DataType::Long,
            )
            .unwrap();

        assert_eq!(registry.listener_count(Resource::Joystick), 2);
    }

    #[test]
    fn test_unregister_removes_across_all_resources() {
        let registry = ListenerRegistry::new();
        let listener = CountingListener::new();
        let other = CountingListener::new();

        registry
            .register(
                Resource::Joystick,
                listener.clone(),
                "stick",
                DataType::Long,
            )
            .unwrap();
        registry
            .register(
                Resource::Humidity,
                listener.clone(),
                "humidity-alert",
                DataType::Long,
            )
            .unwrap();
        registry
            .register(Resource::Joystick, other.clone(), "other", DataType::Long)
            .unwrap();

        let erased: Arc<dyn ChannelListener> = listener;
        registry.unregister(&erased);

        assert_eq!(registry.listener_count(Resource::Joystick), 1);
        assert_eq!(registry.listener_count(Resource::Humidity), 0);
        // The unrelated listener is still dispatch-eligible
        assert_eq!(registry.dispatch(Resource::Joystick, &event()), 1);
        assert_eq!(other.count(), 1);
    }

    #[test]
    fn test_snapshot_survives_concurrent_unregister() {
        let registry = ListenerRegistry::new();
        let listener = CountingListener::new();

        registry
            .register(
                Resource::Joystick,
                listener.clone(),
                "stick",
                DataType::Long,
            )
            .unwrap();

        let snapshot = registry.listeners_for(Resource::Joystick);
        let erased: Arc<dyn ChannelListener> = listener.clone();
        registry.unregister(&erased);

        // The snapshot taken before removal still iterates cleanly
        assert_eq!(snapshot.len(), 1);
        for registration in &snapshot {
            registration.listener().on_event(&event());
        }
        assert_eq!(listener.count(), 1);
        assert_eq!(registry.listener_count(Resource::Joystick), 0);
    }

    #[test]
    fn test_clear_drops_everything() {
        let registry = ListenerRegistry::new();
        let listener = CountingListener::new();
        registry
            .register(
                Resource::Joystick,
                listener.clone(),
                "stick",
                DataType::Long,
            )
            .unwrap();

        registry.clear();
        assert_eq!(registry.listener_count(Resource::Joystick), 0);
        assert_eq!(registry.dispatch(Resource::Joystick, &event()), 0);
    }
}
