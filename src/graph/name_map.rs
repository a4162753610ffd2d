use fnv::FnvHashMap;

/// Keeps repeated sequence names unique within one parse. The first
/// time a base name is resolved it is returned unchanged and its
/// counter starts at 0; every later occurrence bumps the counter and
/// gets `_<counter>` appended, giving `NODE_5`, `NODE_5_1`,
/// `NODE_5_2`, ...
///
/// A `NameMap` belongs to a single parse; make a new one per file.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct NameMap {
    counts: FnvHashMap<String, usize>,
}

impl NameMap {
    pub fn new() -> Self {
        Default::default()
    }

    /// Resolve the next occurrence of `base`, recording it.
    pub fn resolve(&mut self, base: &str) -> String {
        if let Some(count) = self.counts.get_mut(base) {
            *count += 1;
            suffixed(base, *count)
        } else {
            self.counts.insert(base.to_string(), 0);
            base.to_string()
        }
    }

    /// The name the next call to `resolve(base)` will return, without
    /// recording anything. Used to name the downstream end of a link
    /// before that line itself has been resolved.
    pub fn peek(&self, base: &str) -> String {
        match self.count(base) {
            Some(count) => suffixed(base, count + 1),
            None => base.to_string(),
        }
    }

    /// The current counter for `base`, if it has been seen.
    pub fn count(&self, base: &str) -> Option<usize> {
        self.counts.get(base).copied()
    }

    /// Number of distinct base names seen so far.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

fn suffixed(base: &str, count: usize) -> String {
    format!("{}_{}", base, count)
}
