#![forbid(unsafe_code)]
//! plotfield: Procedural vector artwork from deterministic simulations,
//! exported for screens and pen plotters.
//!
//! Modules:
//! - field: seeded noise fields and particle path tracing
//! - automaton: grid-based cellular automaton stepping and patterns
//! - document: vector document model, mode transforms, SVG serialization
//! - render: document builders for traced paths and cell grids
//! - export: raster snapshots, frame-sequence recording, export filenames
//! - layout: paper presets and fit-to-paper math
//! - store: namespaced parameter/preset persistence with randomization
//!
//! For examples and docs, see README and docs.rs.
pub mod automaton;
pub mod document;
pub mod error;
pub mod export;
pub mod field;
pub mod layout;
pub mod render;
pub mod store;

/// Convenient re-exports for common types. Import with `use plotfield::prelude::*;`.
pub mod prelude {
    pub use crate::automaton::{patterns, Automaton, Grid};
    pub use crate::document::svg::serialize;
    pub use crate::document::transform::{
        transform_for_mode, ExportSettings, PlotterOptions, RenderMode,
    };
    pub use crate::document::{PathPrimitive, VectorDocument};
    pub use crate::error::{Error, Result};
    pub use crate::export::filename::ExportFilename;
    pub use crate::export::raster::RasterExporter;
    pub use crate::export::recorder::{
        CaptureOutcome, EncodeJob, EncodeOutcome, EncodeProgress, EncodedAnimation, FrameEncoder,
        FrameRecorder, GifFrameEncoder, RecorderState,
    };
    pub use crate::export::surface::{RasterSurface, RenderSurface};
    pub use crate::field::generator::{FieldConfig, FieldGenerator, FieldMode};
    pub use crate::field::noise::{NoiseSource, PerlinNoise};
    pub use crate::field::tracer::{PathTracer, Polyline, TraceConfig, TracePoint};
    pub use crate::layout::{fit_to_paper, FitTransform, PaperCatalog, PaperPreset, PaperSize};
    pub use crate::render::cells::{render_grid, CellRenderConfig, CellRenderStyle};
    pub use crate::render::flow::{render_polylines, FlowRenderConfig};
    pub use crate::store::storage::{DirStorage, KvStorage, MemoryStorage};
    pub use crate::store::{randomize, Namespace, ParamValue, ParameterSet, ParameterStore, Preset};
}
