//! Export pipeline: raster snapshots, frame-sequence recording, filenames.
pub mod filename;
pub mod raster;
pub mod recorder;
pub mod surface;

pub use filename::ExportFilename;
pub use raster::RasterExporter;
pub use recorder::{
    CaptureOutcome, EncodeJob, EncodeOutcome, EncodeProgress, EncodedAnimation, FrameEncoder,
    FrameRecorder, GifFrameEncoder, RecorderState,
};
pub use surface::{RasterSurface, RenderSurface};
