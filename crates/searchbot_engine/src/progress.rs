use crate::SessionEvent;

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: SessionEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn emit(&self, _event: SessionEvent) {}
}
