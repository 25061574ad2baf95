//! The symbol resolver capability and its implementations.
//!
//! Passes that rewrite protein names ask a [`SymbolResolver`] for the
//! official gene symbol of an identifier. Remote lookups are the caller's
//! business; this crate ships an offline [`TableResolver`] and a memoizing
//! [`CachingResolver`] wrapper.

use std::collections::HashSet;

use dashmap::DashMap;

use crate::tables::SymbolTable;

/// Maps an identifier (accession or candidate symbol) to a gene symbol.
///
/// Must be safe to call repeatedly with the same identifier.
pub trait SymbolResolver: Send + Sync {
    fn resolve(&self, identifier: &str) -> Option<String>;
}

/// Resolves identifiers from an in-memory table.
///
/// An identifier resolves through its table entry, or to itself when it is
/// already one of the table's symbols. Results are upper-cased.
#[derive(Debug, Clone, Default)]
pub struct TableResolver {
    table: SymbolTable,
    symbols: HashSet<String>,
}

impl TableResolver {
    pub fn new(table: SymbolTable) -> Self {
        let symbols = table
            .values()
            .filter(|s| !s.is_empty())
            .map(str::to_uppercase)
            .collect();
        TableResolver { table, symbols }
    }
}

impl SymbolResolver for TableResolver {
    fn resolve(&self, identifier: &str) -> Option<String> {
        if let Some(symbol) = self.table.get(identifier).filter(|s| !s.is_empty()) {
            return Some(symbol.to_uppercase());
        }
        let upper = identifier.to_uppercase();
        self.symbols.contains(&upper).then_some(upper)
    }
}

/// Memoizes another resolver, misses included.
///
/// The cache lives as long as this value; share one instance between pass
/// instances only when cross-network reuse is intended.
pub struct CachingResolver<R> {
    inner: R,
    cache: DashMap<String, Option<String>>,
}

impl<R: SymbolResolver> CachingResolver<R> {
    pub fn new(inner: R) -> Self {
        CachingResolver {
            inner,
            cache: DashMap::new(),
        }
    }

    /// Number of identifiers cached, resolved or not.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Number of cached identifiers that resolved to a symbol.
    pub fn hits(&self) -> usize {
        self.cache.iter().filter(|entry| entry.value().is_some()).count()
    }
}

impl<R: SymbolResolver> SymbolResolver for CachingResolver<R> {
    fn resolve(&self, identifier: &str) -> Option<String> {
        if let Some(cached) = self.cache.get(identifier) {
            return cached.value().clone();
        }
        let resolved = self.inner.resolve(identifier).filter(|s| !s.is_empty());
        self.cache.insert(identifier.to_string(), resolved.clone());
        resolved
    }
}
