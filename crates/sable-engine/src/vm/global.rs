//! Global symbol table
//!
//! Maps top-level identifier names to pre-bound script values. The
//! table is populated during VM setup and read-only afterwards; the
//! compiler's identifier-resolution step queries it once per
//! identifier with a hash cached from tokenization, so lookups never
//! rehash the name.
//!
//! Entries are bucketed by that caller-supplied hash and confirmed by
//! name equality inside the bucket, which keeps the lookup correct
//! even across hash collisions.

use rustc_hash::{FxHashMap, FxHasher};
use std::hash::Hasher;

use crate::vm::value::Value;
use crate::vm::{ExternError, ExternResult};

/// Canonical hash for global symbol lookups.
///
/// The tokenizer caches this per identifier; [`GlobalBindings::find`]
/// only sees names hashed with this function.
pub fn symbol_hash(name: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(name.as_bytes());
    hasher.finish()
}

/// One named binding: the name is kept alongside the value to confirm
/// matches inside a hash bucket.
#[derive(Debug)]
struct GlobalBinding {
    name: String,
    value: Value,
}

/// Name → value table consulted during compile-time identifier
/// resolution.
#[derive(Debug, Default)]
pub struct GlobalBindings {
    buckets: FxHashMap<u64, Vec<GlobalBinding>>,
}

impl GlobalBindings {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`. Fails if the name is already bound —
    /// bindings are never overwritten or merged.
    pub(crate) fn insert(&mut self, name: &str, value: Value) -> ExternResult<()> {
        let bucket = self.buckets.entry(symbol_hash(name)).or_default();

        if bucket.iter().any(|binding| binding.name == name) {
            return Err(ExternError::DuplicateBinding(name.to_string()));
        }

        bucket.push(GlobalBinding {
            name: name.to_string(),
            value,
        });

        Ok(())
    }

    /// Pure lookup with a caller-precomputed hash. Returns the bound
    /// value, or `None` if the name is not bound.
    pub(crate) fn find(&self, name: &str, hash: u64) -> Option<&Value> {
        self.buckets
            .get(&hash)?
            .iter()
            .find(|binding| binding.name == name)
            .map(|binding| &binding.value)
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Check if no names are bound.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
