//! Compiled template cache
//!
//! Maps a literal template source to its compiled form so each distinct
//! template is parsed once. The key is the identity of the fragment slice
//! (address and length), not its contents, which is why sources must be
//! `'static`. Unbounded by default; a capacity turns on LRU eviction.
//!
//! The compiler stays a pure function; all memoization lives here.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use rayon::prelude::*;
use tracing::debug;

use super::compiler::{compile_with, CompileOptions, CompiledTemplate};
use super::instance::{instantiate, Instance};
use super::update::Value;
use crate::dom::Document;
use crate::error::TemplateError;

/// A literal template source with a stable identity
pub type TemplateSource = &'static [&'static str];

/// Cache sizing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of templates kept; `None` never evicts
    pub capacity: Option<NonZeroUsize>,
}

impl CacheConfig {
    pub fn bounded(capacity: NonZeroUsize) -> Self {
        CacheConfig {
            capacity: Some(capacity),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SourceKey {
    addr: usize,
    len: usize,
}

impl SourceKey {
    fn of(source: TemplateSource) -> Self {
        SourceKey {
            addr: source.as_ptr() as usize,
            len: source.len(),
        }
    }
}

/// Memoizing front end over the template compiler
pub struct TemplateCache {
    entries: LruCache<SourceKey, Arc<CompiledTemplate>>,
    options: CompileOptions,
}

impl Default for TemplateCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateCache {
    /// Unbounded cache with default compile options
    pub fn new() -> Self {
        Self::with_options(CacheConfig::default(), CompileOptions::default())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self::with_options(config, CompileOptions::default())
    }

    pub fn with_options(config: CacheConfig, options: CompileOptions) -> Self {
        let entries = match config.capacity {
            Some(capacity) => LruCache::new(capacity),
            None => LruCache::unbounded(),
        };
        TemplateCache { entries, options }
    }

    /// Fetch the compiled form of `source`, compiling it on first use
    ///
    /// Failed compiles are not cached; the next call compiles again.
    pub fn get_or_compile(
        &mut self,
        source: TemplateSource,
    ) -> Result<Arc<CompiledTemplate>, TemplateError> {
        let key = SourceKey::of(source);
        if let Some(template) = self.entries.get(&key) {
            return Ok(Arc::clone(template));
        }

        debug!(fragments = source.len(), cached = self.entries.len(), "template cache miss");
        let template = Arc::new(compile_with(source, &self.options)?);
        self.entries.put(key, Arc::clone(&template));
        Ok(template)
    }

    /// Look up a cached template without compiling or touching recency
    pub fn get(&self, source: TemplateSource) -> Option<Arc<CompiledTemplate>> {
        self.entries.peek(&SourceKey::of(source)).cloned()
    }

    /// Compile several sources in parallel
    ///
    /// Results line up with `sources`. Cached sources are returned as they
    /// are, without touching their recency. Each missing source is compiled
    /// once, however often it is listed, and inserted on success.
    pub fn warm(
        &mut self,
        sources: &[TemplateSource],
    ) -> Vec<Result<Arc<CompiledTemplate>, TemplateError>> {
        let mut known = HashMap::with_capacity(sources.len());
        let mut pending = HashSet::new();
        let mut misses: Vec<TemplateSource> = Vec::new();
        for &source in sources {
            let key = SourceKey::of(source);
            if known.contains_key(&key) || pending.contains(&key) {
                continue;
            }
            match self.entries.peek(&key) {
                Some(template) => {
                    known.insert(key, Ok(Arc::clone(template)));
                }
                None => {
                    pending.insert(key);
                    misses.push(source);
                }
            }
        }

        let options = &self.options;
        let compiled: Vec<_> = misses
            .par_iter()
            .map(|&source| (SourceKey::of(source), compile_with(source, options).map(Arc::new)))
            .collect();

        debug!(sources = sources.len(), compiled = compiled.len(), "template cache warm-up");
        for (key, result) in compiled {
            if let Ok(template) = &result {
                self.entries.put(key, Arc::clone(template));
            }
            known.insert(key, result);
        }

        sources
            .iter()
            .filter_map(|&source| known.get(&SourceKey::of(source)).cloned())
            .collect()
    }

    /// Compile or fetch `source`, then instantiate it into `doc`
    pub fn render(
        &mut self,
        doc: &mut Document,
        source: TemplateSource,
        values: Vec<Value>,
    ) -> Result<Instance, TemplateError> {
        let template = self.get_or_compile(source)?;
        instantiate(&template, doc, values)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
