//! Named-input lookup seam.

use std::collections::BTreeMap;

/// Source of named input values for step construction.
///
/// The CI runner hands the step its context as environment variables, so
/// [`EnvSource`] is the production implementation. [`MapSource`] lets tests
/// and embedders supply inputs without touching process-global state.
pub trait InputSource {
    /// Look up an input by key. `None` means the input is absent; an
    /// empty string is a present, legal value.
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads inputs from the process environment.
pub struct EnvSource;

impl InputSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory input source backed by a map.
#[derive(Debug, Default)]
pub struct MapSource {
    values: BTreeMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an input, builder-style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl InputSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_source_returns_set_values() {
        let source = MapSource::new().with("KEY", "value");
        assert_eq!(source.get("KEY").as_deref(), Some("value"));
    }

    #[test]
    fn map_source_absent_key_is_none() {
        let source = MapSource::new();
        assert_eq!(source.get("MISSING"), None);
    }

    #[test]
    fn map_source_empty_value_is_present() {
        let source = MapSource::new().with("EMPTY", "");
        assert_eq!(source.get("EMPTY").as_deref(), Some(""));
    }
}
