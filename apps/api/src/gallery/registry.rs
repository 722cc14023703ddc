//! Unit Registry: maps a content-unit type tag to its layout class and renderer.
//!
//! Built once in `main` and then shared read-only as `Arc<UnitRegistry>`; nothing
//! mutates it after startup. Adding a content type means registering one entry here;
//! the splitter and the render pipeline never mention concrete tags.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::gallery::renderers::{
    HeroRenderer, PassthroughRenderer, PhotoRenderer, TextRenderer, UnitRenderer,
};
use crate::gallery::units::{TAG_FEATURED, TAG_HERO, TAG_PHOTO, TAG_TEXT};

/// How a unit participates in the page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutClass {
    /// Packed into a multi-column grid run.
    Dense,
    /// Full width; ends any grid run in progress.
    Break,
}

/// Capability descriptor for one type tag.
#[derive(Clone)]
pub struct RegistryEntry {
    pub type_tag: String,
    pub layout_class: LayoutClass,
    /// Hint to the front end that the unit's imagery should load eagerly.
    pub priority_hint: bool,
    pub renderer: Arc<dyn UnitRenderer>,
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("type_tag", &self.type_tag)
            .field("layout_class", &self.layout_class)
            .field("priority_hint", &self.priority_hint)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    entries: HashMap<String, RegistryEntry>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in content type.
    ///
    /// `photoBulk` is deliberately absent: bulk units are expanded into `photo`
    /// units before classification.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(TAG_PHOTO, LayoutClass::Dense, false, Arc::new(PhotoRenderer));
        registry.register(TAG_FEATURED, LayoutClass::Break, true, Arc::new(HeroRenderer));
        registry.register(TAG_HERO, LayoutClass::Break, true, Arc::new(HeroRenderer));
        registry.register(TAG_TEXT, LayoutClass::Break, false, Arc::new(TextRenderer));
        registry
    }

    /// Registers `tag`. Re-registering a tag replaces the earlier entry (last write
    /// wins); the replaced entry is returned.
    ///
    /// Only call during startup, before the registry is shared.
    pub fn register(
        &mut self,
        tag: &str,
        layout_class: LayoutClass,
        priority_hint: bool,
        renderer: Arc<dyn UnitRenderer>,
    ) -> Option<RegistryEntry> {
        self.entries.insert(
            tag.to_string(),
            RegistryEntry {
                type_tag: tag.to_string(),
                layout_class,
                priority_hint,
                renderer,
            },
        )
    }

    /// Registers `tag` as a Dense unit whose raw payload is handed to the front end.
    pub fn register_passthrough(&mut self, tag: &str) -> Option<RegistryEntry> {
        self.register(tag, LayoutClass::Dense, false, Arc::new(PassthroughRenderer))
    }

    /// `None` is a normal outcome: callers skip the unit and log it.
    pub fn lookup(&self, tag: &str) -> Option<&RegistryEntry> {
        self.entries.get(tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
