//! Best-distance record
//!
//! The one piece of persistent state: the furthest fall ever, stored in
//! LocalStorage and written only when a run strictly beats it.

use serde::{Deserialize, Serialize};

/// The persisted best-distance record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BestDistance {
    /// Furthest distance fallen in any run
    pub distance: f32,
    /// Session seed that set the record
    pub seed: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

impl BestDistance {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "freefall_best";

    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a run distance would set a new record. Strict comparison:
    /// equaling the record does not replace it.
    pub fn qualifies(&self, distance: f32) -> bool {
        distance > self.distance
    }

    /// Record a finished run. Returns true if it set a new best; the stored
    /// value never decreases.
    pub fn submit(&mut self, distance: f32, seed: u64, timestamp: f64) -> bool {
        if !self.qualifies(distance) {
            return false;
        }
        self.distance = distance;
        self.seed = seed;
        self.timestamp = timestamp;
        true
    }

    /// Load the record from LocalStorage (WASM only). Any storage or parse
    /// failure degrades to the zero default.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = serde_json::from_str::<BestDistance>(&json) {
                    log::info!("Loaded best distance: {:.0}", best.distance);
                    return best;
                }
            }
        }

        log::info!("No best distance found, starting fresh");
        Self::new()
    }

    /// Save the record to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Best distance saved ({:.0})", self.distance);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_zero() {
        let best = BestDistance::new();
        assert_eq!(best.distance, 0.0);
    }

    #[test]
    fn test_submit_updates_on_strict_improvement() {
        let mut best = BestDistance::new();
        assert!(best.submit(1200.0, 42, 1.0));
        assert_eq!(best.distance, 1200.0);
        assert_eq!(best.seed, 42);
    }

    #[test]
    fn test_record_never_decreases() {
        let mut best = BestDistance::new();
        best.submit(5000.0, 1, 1.0);

        assert!(!best.submit(4999.0, 2, 2.0));
        assert_eq!(best.distance, 5000.0);
        assert_eq!(best.seed, 1);

        // Equal distance does not replace the record either
        assert!(!best.submit(5000.0, 3, 3.0));
        assert_eq!(best.seed, 1);
    }
}
