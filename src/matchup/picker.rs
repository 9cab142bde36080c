//! Random selection of entities and actions

use rand::Rng;

/// Source of the random choices a round makes.
pub trait Picker: Send + Sync {
    /// Picks an entity id to fetch.
    fn entity_id(&self) -> u32;

    /// Picks an index into a list of `available` actions. Only called with
    /// `available > 0`.
    fn action_index(&self, available: usize) -> usize;
}

/// Uniform picks from the thread-local RNG.
#[derive(Debug, Clone)]
pub struct RandomPicker {
    max_entity_id: u32,
}

impl RandomPicker {
    /// Ids are drawn from `1..=max_entity_id`; zero is treated as one.
    pub fn new(max_entity_id: u32) -> Self {
        Self {
            max_entity_id: max_entity_id.max(1),
        }
    }
}

impl Picker for RandomPicker {
    fn entity_id(&self) -> u32 {
        rand::thread_rng().gen_range(1..=self.max_entity_id)
    }

    fn action_index(&self, available: usize) -> usize {
        if available == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..available)
    }
}
