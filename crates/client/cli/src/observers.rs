//! Event observers consuming boundary notifications.
//!
//! Observers never mutate game state; they watch the event stream the
//! engine emits per turn. The telemetry sink stands in for the renderer,
//! audio and particle observers a graphical build would attach.

use realm_core::event::GameEvent;

/// One consumer of the per-turn event stream.
pub trait EventSink {
    fn handle(&mut self, event: &GameEvent);
}

/// Structured-logging sink for the engine's boundary events.
pub struct TelemetrySink {
    /// Coarse capability flag; a disabled sink swallows everything.
    enabled: bool,
}

impl TelemetrySink {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl EventSink for TelemetrySink {
    fn handle(&mut self, event: &GameEvent) {
        if !self.enabled {
            return;
        }
        match event {
            GameEvent::RoomChanged { room } => tracing::info!(room = %room, "room changed"),
            GameEvent::CombatHit { by_player, amount } => {
                tracing::debug!(by_player, amount, "combat hit");
            }
            GameEvent::EnemyDefeated { enemy } => tracing::info!(enemy = %enemy, "enemy defeated"),
            GameEvent::ItemPickedUp { item } => tracing::info!(item = %item, "item picked up"),
        }
    }
}

/// Fan one turn's events out to every attached sink, in order.
pub fn dispatch(sinks: &mut [Box<dyn EventSink>], events: &[GameEvent]) {
    for event in events {
        for sink in sinks.iter_mut() {
            sink.handle(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use realm_core::state::RoomId;

    struct Recorder {
        seen: Rc<RefCell<Vec<String>>>,
    }

    impl EventSink for Recorder {
        fn handle(&mut self, event: &GameEvent) {
            self.seen.borrow_mut().push(format!("{event:?}"));
        }
    }

    #[test]
    fn dispatch_preserves_event_order() {
        let events = vec![
            GameEvent::RoomChanged {
                room: RoomId::new("village"),
            },
            GameEvent::ItemPickedUp {
                item: "rusty sword".to_string(),
            },
        ];
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut sinks: Vec<Box<dyn EventSink>> = vec![Box::new(Recorder {
            seen: Rc::clone(&seen),
        })];
        dispatch(&mut sinks, &events);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].contains("RoomChanged"));
        assert!(seen[1].contains("ItemPickedUp"));
    }
}
