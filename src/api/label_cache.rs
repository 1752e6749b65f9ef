use indexmap::IndexMap;

/// Runtime metrics exposed by the in-engine y-label cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

/// Formatted y labels keyed by the bit pattern of the value.
///
/// Gridline values repeat on every redraw of a reveal run, so the engine
/// formats each one once per dataset. The oldest entry is evicted first.
#[derive(Debug, Default)]
pub(super) struct YLabelCache {
    entries: IndexMap<u64, String>,
    hits: u64,
    misses: u64,
}

impl YLabelCache {
    const MAX_ENTRIES: usize = 256;

    pub(super) fn get_or_insert_with(
        &mut self,
        value: f64,
        format: impl FnOnce(f64) -> String,
    ) -> String {
        let key = value.to_bits();
        if let Some(cached) = self.entries.get(&key) {
            self.hits = self.hits.saturating_add(1);
            return cached.clone();
        }

        self.misses = self.misses.saturating_add(1);
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.shift_remove_index(0);
        }
        let text = format(value);
        self.entries.insert(key, text.clone());
        text
    }

    pub(super) fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub(super) fn stats(&self) -> LabelCacheStats {
        LabelCacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
        }
    }
}
