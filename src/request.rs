//! Batch read requests
//!
//! [`ReadRequest::build`] turns a list of channel records into one batch
//! job: an ordered task per resolvable record plus the deduplicated set
//! of sensor groups the fetch must refresh. Resolution failures are
//! marked on the affected record and never abort the batch; the job
//! proceeds with whatever tasks resolved.

use std::collections::HashSet;

use crate::error::{EngineError, Result};
use crate::record::{now_ms, ChannelRecord};
use crate::resource::{Resource, Sensor};

/// One record bound to its resolved resource
#[derive(Debug, Clone, Copy)]
pub struct ReadTask {
    record_index: usize,
    resource: Resource,
}

impl ReadTask {
    /// Position of the bound record in the caller's record list
    pub fn record_index(&self) -> usize {
        self.record_index
    }

    /// The resolved resource this task reads
    pub fn resource(&self) -> Resource {
        self.resource
    }
}

/// One batch job: ordered tasks plus the sensors they require
#[derive(Debug, Clone, Default)]
pub struct ReadRequest {
    tasks: Vec<ReadTask>,
    sensors: HashSet<Sensor>,
}

impl ReadRequest {
    /// Resolve a record list into a batch job
    ///
    /// Records are processed in input order and task order preserves it.
    /// A record whose resource cannot be resolved, or is not readable,
    /// gets a failure status with message and timestamp written in place
    /// and contributes no task; the rest of the batch is unaffected. The
    /// sensor set is a union: twenty channels needing the same group add
    /// it once.
    pub fn build(records: &mut [ChannelRecord]) -> ReadRequest {
        let mut request = ReadRequest::default();

        for (record_index, record) in records.iter_mut().enumerate() {
            match resolve_readable(record) {
                Ok(resource) => {
                    request.tasks.push(ReadTask {
                        record_index,
                        resource,
                    });
                    if let Some(sensor) = resource.associated_sensor() {
                        request.sensors.insert(sensor);
                    }
                }
                Err(e) => record.set_failure(e.to_string(), now_ms()),
            }
        }

        request
    }

    /// Tasks in input order
    pub fn tasks(&self) -> &[ReadTask] {
        &self.tasks
    }

    /// Deduplicated sensor groups this job must refresh
    pub fn required_sensors(&self) -> &HashSet<Sensor> {
        &self.sensors
    }

    /// Number of resolved tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Whether nothing in the batch resolved
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

fn resolve_readable(record: &ChannelRecord) -> Result<Resource> {
    let resource = Resource::resolve(record.resource())?;
    if resource.is_event_resource() {
        return Err(EngineError::NotReadable(resource.as_str().to_string()));
    }
    Ok(resource)
}
