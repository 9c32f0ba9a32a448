//! Name → algorithm catalog.

use std::collections::HashMap;

use super::{CustomTiling, DynamicHeight, DynamicSlope, Tiling, TilingAlgorithm};

pub const DYNAMIC_SLOPE: &str = "dynamicslope";
pub const DYNAMIC_HEIGHT: &str = "dynamicheight";

/// Algorithms keyed by lower-cased name, with one default
#[derive(Clone, Debug)]
pub struct TilingRegistry {
    algorithms: HashMap<String, TilingAlgorithm>,
    default_key: String,
}

impl Default for TilingRegistry {
    fn default() -> Self {
        let mut registry = TilingRegistry {
            algorithms: HashMap::new(),
            default_key: DYNAMIC_SLOPE.to_string(),
        };
        registry.register(DYNAMIC_SLOPE, DynamicSlope, true);
        registry.register(DYNAMIC_HEIGHT, DynamicHeight, false);
        registry
    }
}

impl TilingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an algorithm; `is_default` makes it the fallback.
    pub fn register(
        &mut self,
        name: &str,
        algorithm: impl Into<TilingAlgorithm>,
        is_default: bool,
    ) {
        let key = normalize(name);
        if is_default {
            self.default_key = key.clone();
        }
        self.algorithms.insert(key, algorithm.into());
    }

    /// Register a host-supplied algorithm under `name`.
    pub fn register_custom(&mut self, name: &str, tiling: impl Tiling + Send + Sync + 'static) {
        self.register(name, CustomTiling::new(name, tiling), false);
    }

    /// Resolve `name`; missing or unknown names give the default algorithm.
    pub fn get(&self, name: Option<&str>) -> &TilingAlgorithm {
        if let Some(found) = name.and_then(|n| self.algorithms.get(&normalize(n))) {
            return found;
        }
        crate::log::debug!(?name, default = %self.default_key, "using default tiling algorithm");
        &self.algorithms[&self.default_key]
    }

    pub fn default_name(&self) -> &str {
        &self.default_key
    }

    pub fn contains(&self, name: &str) -> bool {
        self.algorithms.contains_key(&normalize(name))
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}
