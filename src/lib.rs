mod draw;
mod error;
mod fetch;
mod filter;
mod graph;
mod graph_view;
mod layouts;
mod metadata;
mod payload;
mod rows;
mod scene;
mod search;
mod selection;
mod settings;
mod source;
mod theme;

pub use self::draw::Tooltip;
pub use self::error::LoadError;
pub use self::fetch::{FetchKind, FetchOutcome, Fetcher};
pub use self::filter::{filter_graph, FilterState, FilteredGraph, STATUS_PENDING, STATUS_VALIDATED};
pub use self::graph::{
    clamp_confidence, Category, MappingGraph, MappingLink, MappingNode, MAX_LINK_WEIGHT,
    MIN_LINK_WEIGHT, SYMBOL_SIZE,
};
pub use self::graph_view::{reset_view, GraphViewOutput, MappingGraphView};
pub use self::layouts::{ForceLayout, LayoutState};
pub use self::metadata::Metadata;
pub use self::payload::{
    AyushSystem, ErrorPayload, GraphPayload, Icd11Module, MappingStats, TerminologyData,
};
pub use self::rows::{parse_rows, parse_rows_with, MappingRow, DEFAULT_DELIMITER};
pub use self::scene::{RenderGraph, RenderLink, RenderNode};
pub use self::search::search_nodes;
pub use self::selection::{resolve_selection, Neighbor, NodeDetails, UNKNOWN_STATUS};
pub use self::settings::{SettingsInteraction, SettingsNavigation, SettingsStyle};
#[cfg(not(target_arch = "wasm32"))]
pub use self::source::HttpSource;
pub use self::source::{
    load_or_empty, EmbeddedSource, FileSource, MappingSource, SourceConfig, DEFAULT_DATA_DIR,
    EMBEDDED_MAPPINGS, ENV_API, ENV_DATA, GRAPH_ENDPOINT, MAPPINGS_FILE, STATS_ENDPOINT,
    TERMINOLOGY_FILE,
};
pub use self::theme::{Palette, Theme, THEME_KEY};
