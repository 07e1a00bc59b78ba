//! Bridge between the ECS world and the replication thread.
//!
//! [`setup_replication`] spawns the thread, inserts [`DirtyFields`] and the
//! `Messages<FieldDelta>` mailbox. [`shutdown_replication`] flushes and joins
//! it.

use std::io::Write;

use bevy_ecs::prelude::*;
use crossbeam_channel::{Sender, unbounded};

use crate::events::replication::{FieldDelta, ReplicationCmd};
use crate::resources::dirtyfields::DirtyFields;
use crate::systems::replication::{ReplicationStats, replication_thread};

#[derive(Resource)]
pub struct ReplicationBridge {
    /// Sender for [`ReplicationCmd`] messages (ECS -> replication thread).
    pub tx_cmd: Sender<ReplicationCmd>,
    pub handle: std::thread::JoinHandle<ReplicationStats>,
}

/// Spawn the replication thread writing into `sink`.
pub fn setup_replication(world: &mut World, sink: Box<dyn Write + Send>) {
    let (tx_cmd, rx_cmd) = unbounded::<ReplicationCmd>();

    let handle = std::thread::spawn(move || replication_thread(rx_cmd, sink));

    world.insert_resource(ReplicationBridge { tx_cmd, handle });
    world.init_resource::<DirtyFields>();
    world.init_resource::<Messages<FieldDelta>>();
}

/// Request shutdown of the replication thread, join it and return its
/// counters.
pub fn shutdown_replication(world: &mut World) -> Option<ReplicationStats> {
    let bridge = world.remove_resource::<ReplicationBridge>()?;
    let _ = bridge.tx_cmd.send(ReplicationCmd::Shutdown);
    bridge.handle.join().ok()
}
