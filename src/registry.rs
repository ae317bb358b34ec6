//! Label to colour registry and the list of reusable classes.
//!
//! Two sets are tracked separately:
//! - every label that has ever been given a colour (through [`ClassRegistry::color_for`]
//!   or [`ClassRegistry::set_color`]),
//! - the smaller list of classes explicitly submitted with "add class", which is
//!   what the edit menu offers for reuse.
//!
//! Typing an ad hoc label colours it but does not make it a reusable class.

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::model::ColorHex;

/// Session-wide label → colour mapping.
#[derive(Debug, Clone)]
pub struct ClassRegistry {
    colors: HashMap<String, ColorHex>,
    classes: Vec<String>,
    rng: StdRng,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Registry whose generated colours are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            colors: HashMap::new(),
            classes: Vec::new(),
            rng,
        }
    }

    /// Colour for `label`, generating and recording a random one on first use.
    ///
    /// Stable for the rest of the session unless [`Self::set_color`] overrides it.
    pub fn color_for(&mut self, label: &str) -> ColorHex {
        if let Some(color) = self.colors.get(label) {
            return color.clone();
        }
        let color = ColorHex::random(&mut self.rng);
        log::debug!("🎨 New colour {} for label '{}'", color, label);
        self.colors.insert(label.to_string(), color.clone());
        color
    }

    /// Recorded colour for `label` without generating one.
    pub fn get(&self, label: &str) -> Option<&ColorHex> {
        self.colors.get(label)
    }

    /// Override the colour of `label`.
    pub fn set_color(&mut self, label: &str, color: ColorHex) {
        self.colors.insert(label.to_string(), color);
    }

    /// Register `label` as a reusable class. `color` is only used when the
    /// label has no colour yet.
    ///
    /// Returns false (and changes nothing) for an empty or already known class.
    pub fn add_class(&mut self, label: &str, color: ColorHex) -> bool {
        if label.is_empty() || self.is_known(label) {
            return false;
        }
        self.classes.push(label.to_string());
        self.colors.entry(label.to_string()).or_insert(color);
        log::info!("🏷️ Added class '{}'", label);
        true
    }

    pub fn is_known(&self, label: &str) -> bool {
        self.classes.iter().any(|c| c == label)
    }

    /// Explicitly added classes, in the order they were added.
    pub fn known_labels(&self) -> &[String] {
        &self.classes
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}
