//! Compiler configuration.

use std::fmt;

use protoplan_core::{FeatureExtension, FeatureSetDefaults};

/// Messages whose storage cost reaches this use out-of-line storage.
pub const DEFAULT_STORAGE_COST_THRESHOLD: u32 = 17;

/// Pointer width a layout is computed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    PointerWidth64,
    PointerWidth32,
}

impl Target {
    pub const ALL: [Target; 2] = [Target::PointerWidth64, Target::PointerWidth32];

    pub fn pointer_bytes(self) -> u32 {
        match self {
            Target::PointerWidth64 => 8,
            Target::PointerWidth32 => 4,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::PointerWidth64 => f.write_str("64-bit"),
            Target::PointerWidth32 => f.write_str("32-bit"),
        }
    }
}

/// Configuration for building a descriptor pool and compiling it.
#[derive(Clone, Debug)]
pub struct CompilerConfig {
    pub(crate) defaults: FeatureSetDefaults,
    pub(crate) extensions: Vec<FeatureExtension>,
    pub(crate) targets: Vec<Target>,
    pub(crate) storage_cost_threshold: u32,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            defaults: FeatureSetDefaults::builtin(),
            extensions: Vec::new(),
            targets: Target::ALL.to_vec(),
            storage_cost_threshold: DEFAULT_STORAGE_COST_THRESHOLD,
        }
    }
}

impl CompilerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the edition defaults table.
    pub fn defaults(mut self, defaults: FeatureSetDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Register a custom feature extension.
    pub fn extension(mut self, extension: FeatureExtension) -> Self {
        self.extensions.push(extension);
        self
    }

    /// Restrict the targets reported by compiled messages.
    ///
    /// Layouts are always computed for both pointer widths; this only picks
    /// which ones get encoded.
    pub fn targets(mut self, targets: &[Target]) -> Self {
        self.targets = targets.to_vec();
        self
    }

    pub fn storage_cost_threshold(mut self, threshold: u32) -> Self {
        self.storage_cost_threshold = threshold;
        self
    }

    pub fn feature_defaults(&self) -> &FeatureSetDefaults {
        &self.defaults
    }

    pub fn feature_extensions(&self) -> &[FeatureExtension] {
        &self.extensions
    }

    pub fn selected_targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn cost_threshold(&self) -> u32 {
        self.storage_cost_threshold
    }
}
