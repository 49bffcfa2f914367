//! Bundle statistics dump as emitted by the bundler's output hook.
//!
//! ```json
//! {
//!   "output": [
//!     { "type": "chunk", "fileName": "index.js", "isEntry": true,
//!       "facadeModuleId": "/app/src/main.ts",
//!       "modules": { "/app/src/main.ts": { "renderedLength": 120 } } },
//!     { "type": "asset", "fileName": "index.css" }
//!   ],
//!   "moduleInfo": {
//!     "/app/src/main.ts": { "importedIds": ["/app/src/app.ts"] }
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use bundlescope_core::{Error, ModuleSource, RawModule, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleStats {
    pub output: Vec<OutputItem>,
    #[serde(default)]
    pub module_info: HashMap<String, ModuleInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputItem {
    Chunk(OutputChunk),
    Asset(OutputAsset),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputChunk {
    pub file_name: String,
    #[serde(default)]
    pub is_entry: bool,
    #[serde(default)]
    pub facade_module_id: Option<String>,
    #[serde(default)]
    pub modules: HashMap<String, RawModule>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputAsset {
    pub file_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleInfo {
    #[serde(default)]
    pub imported_ids: Vec<String>,
}

impl BundleStats {
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            Error::deserialization_failed(e.to_string())
                .with_operation("input::parse")
                .set_source(e)
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::from(e)
                .with_operation("input::load")
                .with_context("path", path.display().to_string())
        })?;
        Self::from_json_str(&content).map_err(|e| {
            e.with_operation("input::load")
                .with_context("path", path.display().to_string())
        })
    }
}

/// One chunk's modules joined with the bundle-wide import table.
pub struct ChunkSource<'a> {
    chunk: &'a OutputChunk,
    module_info: &'a HashMap<String, ModuleInfo>,
}

impl<'a> ChunkSource<'a> {
    pub fn new(chunk: &'a OutputChunk, module_info: &'a HashMap<String, ModuleInfo>) -> Self {
        Self { chunk, module_info }
    }
}

impl ModuleSource for ChunkSource<'_> {
    fn module(&self, id: &str) -> Option<&RawModule> {
        self.chunk.modules.get(id)
    }

    fn imported_ids(&self, id: &str) -> &[String] {
        self.module_info
            .get(id)
            .map(|info| info.imported_ids.as_slice())
            .unwrap_or_default()
    }
}
