use std::collections::HashMap;

use super::types::CharacterEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

type Listener = Box<dyn FnMut(CharacterEvent)>;

/// Per-event observer lists. Broadcasts run every listener synchronously,
/// in subscription order, and nothing is queued.
pub struct EventBus {
    listeners: HashMap<CharacterEvent, Vec<(ListenerId, Listener)>>,
    next_id: u32,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn subscribe<F>(&mut self, event: CharacterEvent, listener: F) -> ListenerId
    where
        F: FnMut(CharacterEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        self.listeners
            .entry(event)
            .or_default()
            .push((id, Box::new(listener)));

        id
    }

    pub fn subscribe_all<F>(&mut self, listener: F) -> Vec<ListenerId>
    where
        F: FnMut(CharacterEvent) + Clone + 'static,
    {
        CharacterEvent::ALL
            .iter()
            .map(|&event| self.subscribe(event, listener.clone()))
            .collect()
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        for listeners in self.listeners.values_mut() {
            if let Some(index) = listeners.iter().position(|(lid, _)| *lid == id) {
                drop(listeners.remove(index));
                return true;
            }
        }
        false
    }

    pub fn broadcast(&mut self, event: CharacterEvent) {
        let Some(listeners) = self.listeners.get_mut(&event) else {
            return;
        };

        log::trace!("Broadcasting {} to {} listeners", event.as_str(), listeners.len());
        for (_, listener) in listeners.iter_mut() {
            listener(event);
        }
    }

    pub fn listener_count(&self, event: CharacterEvent) -> usize {
        self.listeners.get(&event).map_or(0, Vec::len)
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}
