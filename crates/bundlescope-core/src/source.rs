//! Raw module records as reported by the bundler.

use std::collections::HashMap;

use serde::Deserialize;

/// Per-module record for one output chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModule {
    /// Byte length of the module's code after bundling, before compression.
    pub rendered_length: u64,
}

/// Lookup interface the graph builder walks.
pub trait ModuleSource {
    /// The raw record for `id`, or `None` when the module is not part of the chunk.
    fn module(&self, id: &str) -> Option<&RawModule>;

    /// Ids statically imported by `id`, in import order.
    fn imported_ids(&self, id: &str) -> &[String];
}

/// In-memory [`ModuleSource`].
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    modules: HashMap<String, RawModule>,
    imports: HashMap<String, Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module with its rendered length and ordered imports.
    pub fn with_module<I, S>(
        mut self,
        id: impl Into<String>,
        rendered_length: u64,
        imports: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = id.into();
        self.imports
            .insert(id.clone(), imports.into_iter().map(Into::into).collect());
        self.modules.insert(id, RawModule { rendered_length });
        self
    }

    /// Register import edges for an id that has no module record.
    pub fn with_imports<I, S>(mut self, id: impl Into<String>, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports
            .insert(id.into(), imports.into_iter().map(Into::into).collect());
        self
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleSource for MemorySource {
    fn module(&self, id: &str) -> Option<&RawModule> {
        self.modules.get(id)
    }

    fn imported_ids(&self, id: &str) -> &[String] {
        self.imports.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}
