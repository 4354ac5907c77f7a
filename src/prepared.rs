//! Reusable prepared reads
//!
//! A [`PreparedRead`] wraps one batch job built at preparation time so it
//! can be executed repeatedly: resolution cost is paid once, every
//! execution is a fresh fetch + refresh + write cycle over the same
//! resolved task and sensor sets.

use crate::engine::Engine;
use crate::record::ChannelRecord;
use crate::request::ReadRequest;

/// A pre-resolved, repeatedly executable batch read
pub struct PreparedRead<'a> {
    engine: &'a Engine,
    request: ReadRequest,
    records: Vec<ChannelRecord>,
}

impl<'a> PreparedRead<'a> {
    pub(crate) fn new(engine: &'a Engine, mut records: Vec<ChannelRecord>) -> Self {
        // Resolution happens exactly once, here
        let request = ReadRequest::build(&mut records);
        Self {
            engine,
            request,
            records,
        }
    }

    /// Execute the prepared job and return the updated records
    ///
    /// Each call performs one fetch + refresh + fan-out cycle; resources
    /// are not re-resolved.
    pub fn execute(&mut self) -> &[ChannelRecord] {
        self.engine.execute_request(&self.request, &mut self.records);
        &self.records
    }

    /// The records, without triggering a fetch
    pub fn records(&self) -> &[ChannelRecord] {
        &self.records
    }

    /// The resolved batch job
    pub fn request(&self) -> &ReadRequest {
        &self.request
    }

    /// Release the handle
    ///
    /// The records are caller-provided data and the engine holds no
    /// per-read resources, so this is a well-defined no-op that exists
    /// for the scoped-resource convention callers expect.
    pub fn close(self) {}
}
