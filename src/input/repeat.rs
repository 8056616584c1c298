use std::time::{Duration, Instant};

use egui::{Key, Modifiers};

/// A synthetic press produced while a key stays held
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatedKey {
    pub key: Key,
    pub modifiers: Modifiers,
    /// Text the original press produced, replayed with each repeat
    pub text: Option<String>,
}

#[derive(Debug, Clone)]
struct HeldKey {
    key: Key,
    modifiers: Modifiers,
    text: Option<String>,
    next_fire: Instant,
}

/// Re-fires the most recently pressed key after `delay`, then every
/// `interval`, until it is released.
#[derive(Debug, Clone)]
pub struct KeyRepeat {
    delay: Duration,
    interval: Duration,
    held: Option<HeldKey>,
}

impl KeyRepeat {
    pub fn new(delay: Duration, interval: Duration) -> Self {
        Self {
            delay,
            interval,
            held: None,
        }
    }

    /// Starts tracking `key`, replacing any key already held.
    pub fn press(&mut self, key: Key, modifiers: Modifiers, now: Instant) {
        self.held = Some(HeldKey {
            key,
            modifiers,
            text: None,
            next_fire: now + self.delay,
        });
    }

    /// Associates the text produced by the latest press with the held key.
    pub fn attach_text(&mut self, text: &str) {
        if let Some(held) = &mut self.held {
            held.text.get_or_insert_with(String::new).push_str(text);
        }
    }

    pub fn release(&mut self, key: Key) {
        if self.held.as_ref().is_some_and(|held| held.key == key) {
            self.held = None;
        }
    }

    pub fn release_all(&mut self) {
        self.held = None;
    }

    /// Returns a repeat if one is due. Fires at most once per call so a
    /// stalled frame does not flush a burst of presses.
    pub fn poll(&mut self, now: Instant) -> Option<RepeatedKey> {
        let held = self.held.as_mut()?;
        if now < held.next_fire {
            return None;
        }
        held.next_fire += self.interval;
        if held.next_fire <= now {
            held.next_fire = now + self.interval;
        }
        Some(RepeatedKey {
            key: held.key,
            modifiers: held.modifiers,
            text: held.text.clone(),
        })
    }
}
