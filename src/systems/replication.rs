//! Replication of dirty waddle fields.
//!
//! At the end of every tick:
//! - [`flush_dirty_fields`] drains [`DirtyFields`] into [`FieldDelta`]
//!   messages carrying the field's current value,
//! - [`forward_field_deltas`] hands them to the replication thread through
//!   the [`ReplicationBridge`],
//! - [`update_field_delta_messages`] advances the message queue.
//!
//! [`replication_thread`] owns the outbound sink and writes one JSON object
//! per line.

use std::io::Write;

use bevy_ecs::prelude::*;
use crossbeam_channel::Receiver;
use log::{debug, warn};
use serde::Serialize;

use crate::components::waddle::WaddleAnimation;
use crate::events::replication::{FieldDelta, ReplicationCmd};
use crate::resources::dirtyfields::DirtyFields;
use crate::resources::gametiming::GameTiming;
use crate::resources::replication::ReplicationBridge;

/// Turn every pending dirty mark into a [`FieldDelta`].
///
/// Entities despawned since they were marked are skipped.
pub fn flush_dirty_fields(
    mut dirty: ResMut<DirtyFields>,
    timing: Res<GameTiming>,
    waddlers: Query<&WaddleAnimation>,
    mut writer: MessageWriter<FieldDelta>,
) {
    for (entity, field) in dirty.drain() {
        let Ok(waddle) = waddlers.get(entity) else {
            debug!("Dropping dirty field {} of missing {:?}", field, entity);
            continue;
        };
        let value = match field {
            WaddleAnimation::IS_WADDLING => waddle.is_waddling,
            other => {
                warn!("Unknown replicated field {} on {:?}", other, entity);
                continue;
            }
        };
        writer.write(FieldDelta {
            tick: timing.cur_tick,
            entity: entity.to_bits(),
            component: WaddleAnimation::COMPONENT,
            field,
            value,
        });
    }
}

/// Forward this tick's deltas to the replication thread.
pub fn forward_field_deltas(bridge: Res<ReplicationBridge>, mut reader: MessageReader<FieldDelta>) {
    for delta in reader.read() {
        // Ignore send errors on shutdown
        let _ = bridge.tx_cmd.send(ReplicationCmd::Send(delta.clone()));
    }
}

/// Advance the ECS message queue for [`FieldDelta`].
pub fn update_field_delta_messages(mut msgs: ResMut<Messages<FieldDelta>>) {
    msgs.update();
}

/// Counters reported when the replication thread exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplicationStats {
    pub deltas_written: u64,
    pub write_errors: u64,
}

/// Entry point of the replication thread.
///
/// Serializes each received [`FieldDelta`] as a JSON line into `sink` until
/// [`ReplicationCmd::Shutdown`] arrives or the channel closes. Write failures
/// are logged and counted, never fatal.
pub fn replication_thread(
    rx_cmd: Receiver<ReplicationCmd>,
    mut sink: Box<dyn Write + Send>,
) -> ReplicationStats {
    let mut stats = ReplicationStats::default();

    for cmd in rx_cmd.iter() {
        match cmd {
            ReplicationCmd::Send(delta) => match write_delta(&mut sink, &delta) {
                Ok(()) => stats.deltas_written += 1,
                Err(e) => {
                    warn!("[replication] failed to write delta {:?}: {}", delta, e);
                    stats.write_errors += 1;
                }
            },
            ReplicationCmd::Shutdown => break,
        }
    }

    if let Err(e) = sink.flush() {
        warn!("[replication] failed to flush sink: {}", e);
        stats.write_errors += 1;
    }
    debug!("[replication] thread exiting: {:?}", stats);
    stats
}

fn write_delta(sink: &mut dyn Write, delta: &FieldDelta) -> std::io::Result<()> {
    serde_json::to_writer(&mut *sink, delta)?;
    sink.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use std::sync::{Arc, Mutex};

    /// Writer that keeps its bytes reachable after being boxed.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn thread_writes_one_json_line_per_delta() {
        let buffer = SharedBuffer::default();
        let (tx, rx) = unbounded();
        for (tick, value) in [(3, true), (4, false)] {
            tx.send(ReplicationCmd::Send(FieldDelta {
                tick,
                entity: 42,
                component: WaddleAnimation::COMPONENT,
                field: WaddleAnimation::IS_WADDLING,
                value,
            }))
            .unwrap();
        }
        tx.send(ReplicationCmd::Shutdown).unwrap();

        let stats = replication_thread(rx, Box::new(buffer.clone()));
        assert_eq!(stats.deltas_written, 2);
        assert_eq!(stats.write_errors, 0);

        let bytes = buffer.0.lock().unwrap().clone();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["tick"], 3);
        assert_eq!(lines[0]["entity"], 42);
        assert_eq!(lines[0]["field"], "is_waddling");
        assert_eq!(lines[0]["value"], true);
        assert_eq!(lines[1]["value"], false);
    }
}
