use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::LoadError;
use crate::graph::MappingGraph;
use crate::payload::{MappingStats, TerminologyData};
use crate::rows::parse_rows;

pub const MAPPINGS_FILE: &str = "sample-mappings.csv";
pub const TERMINOLOGY_FILE: &str = "terminology.json";

pub const GRAPH_ENDPOINT: &str = "/api/mappings";
pub const STATS_ENDPOINT: &str = "/api/terminology";

pub const ENV_API: &str = "NAMASTE_MAP_API";
pub const ENV_DATA: &str = "NAMASTE_MAP_DATA";
pub const DEFAULT_DATA_DIR: &str = "data";

pub const EMBEDDED_MAPPINGS: &str = include_str!("../data/sample-mappings.csv");

/// Read-only provider of the mapping graph and its statistics.
///
/// Both calls are independent; a failure of one says nothing about the other.
pub trait MappingSource: Send + Sync {
    fn fetch_graph(&self) -> Result<MappingGraph, LoadError>;
    fn fetch_stats(&self) -> Result<TerminologyData, LoadError>;

    /// Short human readable origin, used in logs and the status line.
    fn describe(&self) -> String;
}

/// Reads the mapping table and the terminology file from a directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read(&self, name: &str) -> Result<String, LoadError> {
        let path = self.dir.join(name);
        std::fs::read_to_string(&path).map_err(|e| LoadError::io(path, e))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl MappingSource for FileSource {
    fn fetch_graph(&self) -> Result<MappingGraph, LoadError> {
        let text = self.read(MAPPINGS_FILE)?;
        Ok(MappingGraph::from_rows(&parse_rows(&text)))
    }

    fn fetch_stats(&self) -> Result<TerminologyData, LoadError> {
        let text = self.read(TERMINOLOGY_FILE)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn describe(&self) -> String {
        format!("files in {}", self.dir.display())
    }
}

/// Sample data compiled into the binary. Statistics are derived from the rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl MappingSource for EmbeddedSource {
    fn fetch_graph(&self) -> Result<MappingGraph, LoadError> {
        Ok(MappingGraph::from_rows(&parse_rows(EMBEDDED_MAPPINGS)))
    }

    fn fetch_stats(&self) -> Result<TerminologyData, LoadError> {
        Ok(TerminologyData {
            mapping_stats: MappingStats::summarize(&parse_rows(EMBEDDED_MAPPINGS)),
            ..Default::default()
        })
    }

    fn describe(&self) -> String {
        "embedded sample data".to_string()
    }
}

/// Talks to the mapping and terminology endpoints of a running site.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T, LoadError> {
        let url = format!("{}{endpoint}", self.base_url);
        match ureq::get(&url).call() {
            Ok(resp) => {
                let body = resp
                    .into_string()
                    .map_err(|e| LoadError::Http(e.to_string()))?;
                Ok(serde_json::from_str(&body)?)
            }
            Err(ureq::Error::Status(status, resp)) => {
                let message = resp
                    .into_json::<crate::payload::ErrorPayload>()
                    .map_or_else(|_| "unknown error".to_string(), |p| p.error);
                Err(LoadError::Remote { status, message })
            }
            Err(e) => Err(LoadError::Http(e.to_string())),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl MappingSource for HttpSource {
    fn fetch_graph(&self) -> Result<MappingGraph, LoadError> {
        let payload: crate::payload::GraphPayload = self.get(GRAPH_ENDPOINT)?;
        Ok(payload.into())
    }

    fn fetch_stats(&self) -> Result<TerminologyData, LoadError> {
        self.get(STATS_ENDPOINT)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Where mapping data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Files(PathBuf),
    Http(String),
    Embedded,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Files(PathBuf::from(DEFAULT_DATA_DIR))
    }
}

impl SourceConfig {
    /// `NAMASTE_MAP_API` selects an http source, otherwise `NAMASTE_MAP_DATA`
    /// (or `./data`) is read from disk.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(ENV_API).ok().as_deref(),
            std::env::var(ENV_DATA).ok().as_deref(),
        )
    }

    pub fn from_vars(api: Option<&str>, data: Option<&str>) -> Self {
        if let Some(api) = api.filter(|v| !v.trim().is_empty()) {
            return SourceConfig::Http(api.trim().to_string());
        }
        match data.filter(|v| !v.trim().is_empty()) {
            Some(dir) => SourceConfig::Files(PathBuf::from(dir.trim())),
            None => SourceConfig::default(),
        }
    }

    pub fn into_source(self) -> Box<dyn MappingSource> {
        let source: Box<dyn MappingSource> = match self {
            SourceConfig::Files(dir) => Box::new(FileSource::new(dir)),
            #[cfg(not(target_arch = "wasm32"))]
            SourceConfig::Http(base) => Box::new(HttpSource::new(base)),
            #[cfg(target_arch = "wasm32")]
            SourceConfig::Http(base) => {
                warn!("http source {base} is not available on the web, using embedded data");
                Box::new(EmbeddedSource)
            }
            SourceConfig::Embedded => Box::new(EmbeddedSource),
        };
        info!("mapping data source: {}", source.describe());
        source
    }
}

/// Loads the graph, logging and discarding the failure reason.
pub fn load_or_empty(source: &dyn MappingSource) -> MappingGraph {
    source.fetch_graph().unwrap_or_else(|e| {
        warn!("failed to load mappings from {}: {e}", source.describe());
        MappingGraph::new()
    })
}
