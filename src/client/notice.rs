//! Timed display slots
//!
//! A slot holds one value that should disappear after a delay. Each `set`
//! bumps a generation counter; an expiry only clears the slot if it carries
//! the current generation, so a timer armed for an older value can never
//! wipe a newer one.

/// Value with generation-checked expiry
#[derive(Debug, Clone)]
pub struct TimedSlot<T> {
    value: Option<T>,
    generation: u64,
}

impl<T> Default for TimedSlot<T> {
    fn default() -> Self {
        Self {
            value: None,
            generation: 0,
        }
    }
}

impl<T> TimedSlot<T> {
    /// Replace the value, returning the generation an expiry must present
    pub fn set(&mut self, value: T) -> u64 {
        self.generation += 1;
        self.value = Some(value);
        self.generation
    }

    /// Clear the slot if `generation` is still current
    pub fn expire(&mut self, generation: u64) -> bool {
        if self.generation == generation && self.value.is_some() {
            self.value = None;
            true
        } else {
            false
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}
