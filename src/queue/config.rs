//! Queue Configuration Module
//!
//! Provides configuration structures and parsing for queue construction,
//! integrating with the application's configuration discovery.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::queue::MemoryTracker;

/// Main queue configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Element slots reserved when the queue is constructed
    pub initial_capacity: usize,

    /// Memory limit in bytes across the container, nodes and values
    pub memory_limit: Option<usize>,

    /// Enable memory tracking (implied by a memory limit)
    pub enable_memory_tracking: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            memory_limit: None,
            enable_memory_tracking: false,
        }
    }
}

impl QueueConfig {
    /// Build the tracker this configuration asks for, if any
    pub fn build_tracker(&self) -> Option<Arc<MemoryTracker>> {
        match self.memory_limit {
            Some(limit) => Some(Arc::new(MemoryTracker::new(limit))),
            None if self.enable_memory_tracking => Some(Arc::new(MemoryTracker::unlimited())),
            None => None,
        }
    }
}

/// Predefined queue configurations
#[derive(Debug, Clone, Copy)]
pub enum QueuePreset {
    /// No reservation, no tracking
    Untracked,
    /// Tracks every allocation without limiting it
    Tracked,
    /// Tracked and capped at 1MB
    LowMemory,
}

impl QueuePreset {
    pub fn config(self) -> QueueConfig {
        match self {
            QueuePreset::Untracked => QueueConfig::default(),

            QueuePreset::Tracked => QueueConfig {
                enable_memory_tracking: true,
                ..Default::default()
            },

            QueuePreset::LowMemory => QueueConfig {
                memory_limit: Some(1024 * 1024), // 1MB
                enable_memory_tracking: true,
                ..Default::default()
            },
        }
    }
}

pub fn load_queue_config(toml_str: &str) -> Result<QueueConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

pub fn save_queue_config(config: &QueueConfig) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(config)
}
