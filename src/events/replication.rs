//! Replication deltas.
//!
//! [`flush_dirty_fields`](crate::systems::replication::flush_dirty_fields)
//! turns every dirty field into a [`FieldDelta`] message at the end of a
//! tick; [`forward_field_deltas`](crate::systems::replication::forward_field_deltas)
//! ships them to the replication thread.

use bevy_ecs::message::Message;
use serde::Serialize;

/// New value of one replicated field.
#[derive(Message, Debug, Clone, PartialEq, Serialize)]
pub struct FieldDelta {
    pub tick: u64,
    /// Entity id bits.
    pub entity: u64,
    pub component: &'static str,
    pub field: &'static str,
    pub value: bool,
}

/// Commands sent *to* the replication thread.
#[derive(Debug, Clone)]
pub enum ReplicationCmd {
    Send(FieldDelta),
    Shutdown,
}
