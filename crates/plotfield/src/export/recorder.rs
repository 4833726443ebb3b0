//! Asynchronous multi-frame capture/encode state machine.
//!
//! States: Idle -> Recording -> Rendering -> Finished; Idle/Recording ->
//! Cancelled; Rendering -> Error on encode failure. Capture is synchronous;
//! encoding runs on a worker thread that reports progress over a channel.
//! Cancellation during Rendering is best-effort: the token is checked
//! between frame encodes, so in-flight work may still complete.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::export::filename::unix_millis;
use crate::export::surface::RenderSurface;

/// Recorder lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
    Rendering,
    Finished,
    Cancelled,
    Error,
}

impl RecorderState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled | Self::Error)
    }
}

/// Encode progress delivered during the Rendering phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EncodeProgress {
    pub captured_frames: usize,
    pub total_frames: usize,
    /// Fraction of frames encoded, in [0, 1].
    pub progress: f32,
}

/// A finished animation.
#[derive(Clone, Debug)]
pub struct EncodedAnimation {
    pub bytes: Vec<u8>,
    pub frame_count: usize,
    pub suggested_filename: String,
}

/// Result of waiting on an encode job.
#[derive(Clone, Debug)]
pub enum EncodeOutcome {
    Finished(EncodedAnimation),
    /// The encode was cancelled before completing; buffered frames were
    /// discarded and no output was produced.
    Cancelled,
}

/// Encoder capability consumed by the recorder.
///
/// `cancel` is polled between frames; returning `Ok(None)` acknowledges a
/// cancellation. `on_frame` receives the 1-based count of encoded frames.
pub trait FrameEncoder: Send + Sync {
    fn encode(
        &self,
        frames: &[RgbaImage],
        fps: u32,
        cancel: &AtomicBool,
        on_frame: &mut dyn FnMut(usize),
    ) -> Result<Option<Vec<u8>>>;
}

/// GIF encoder with a per-frame delay of 1000/fps ms.
#[derive(Clone, Copy, Debug, Default)]
pub struct GifFrameEncoder;

impl FrameEncoder for GifFrameEncoder {
    fn encode(
        &self,
        frames: &[RgbaImage],
        fps: u32,
        cancel: &AtomicBool,
        on_frame: &mut dyn FnMut(usize),
    ) -> Result<Option<Vec<u8>>> {
        let mut out = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut out);
            encoder
                .set_repeat(Repeat::Infinite)
                .map_err(|e| Error::Encode(e.to_string()))?;
            let delay = Delay::from_numer_denom_ms(1000, fps.max(1));

            for (i, frame) in frames.iter().enumerate() {
                if cancel.load(Ordering::Relaxed) {
                    return Ok(None);
                }
                encoder
                    .encode_frame(Frame::from_parts(frame.clone(), 0, 0, delay))
                    .map_err(|e| Error::Encode(e.to_string()))?;
                on_frame(i + 1);
            }
        }
        Ok(Some(out))
    }
}

/// Outcome of a [`FrameRecorder::capture_frame`] call.
pub enum CaptureOutcome {
    /// Frame buffered; target not yet reached.
    Captured { captured: usize, total: usize },
    /// Call outside the Recording state; nothing happened.
    Ignored,
    /// The target frame count was reached and encoding started.
    Complete(EncodeJob),
}

/// Handle to a background encode.
pub struct EncodeJob {
    /// Per-frame progress updates.
    pub progress: Receiver<EncodeProgress>,
    result: Receiver<Result<EncodeOutcome>>,
}

impl EncodeJob {
    /// Blocks until encoding finishes, is cancelled, or fails.
    pub fn wait(self) -> Result<EncodeOutcome> {
        self.result
            .recv()
            .map_err(|_| Error::Other("encode worker disconnected".into()))?
    }
}

/// Multi-frame capture and encode state machine.
pub struct FrameRecorder {
    fps: u32,
    total_frames: usize,
    frames: Vec<RgbaImage>,
    state: Arc<Mutex<RecorderState>>,
    cancel: Arc<AtomicBool>,
    encoder: Option<Arc<dyn FrameEncoder>>,
}

impl FrameRecorder {
    /// Creates a recorder targeting ceil(fps * duration_secs) frames.
    pub fn new(fps: u32, duration_secs: f32, encoder: Option<Arc<dyn FrameEncoder>>) -> Self {
        let total_frames = ((fps.max(1) as f32) * duration_secs.max(0.0)).ceil() as usize;
        Self {
            fps: fps.max(1),
            total_frames: total_frames.max(1),
            frames: Vec::new(),
            state: Arc::new(Mutex::new(RecorderState::Idle)),
            cancel: Arc::new(AtomicBool::new(false)),
            encoder,
        }
    }

    pub fn state(&self) -> RecorderState {
        *self.state.lock().expect("recorder state lock poisoned")
    }

    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    pub fn captured_frames(&self) -> usize {
        self.frames.len()
    }

    /// Idle -> Recording. Fails without moving out of Idle when the encoder
    /// capability is missing.
    pub fn start(&mut self) -> Result<()> {
        let mut state = self.state.lock().expect("recorder state lock poisoned");
        if *state != RecorderState::Idle {
            return Err(Error::Validation(format!(
                "cannot start recording from {:?}",
                *state
            )));
        }
        if self.encoder.is_none() {
            return Err(Error::DependencyUnavailable(
                "no frame encoder configured".into(),
            ));
        }
        self.frames.clear();
        self.cancel.store(false, Ordering::Relaxed);
        *state = RecorderState::Recording;
        info!(total_frames = self.total_frames, fps = self.fps, "recording started");
        Ok(())
    }

    /// Buffers a deep-copied snapshot of the surface.
    ///
    /// A no-op outside Recording. Reaching the target frame count stops the
    /// recording and returns the encode job.
    pub fn capture_frame(&mut self, surface: &dyn RenderSurface) -> Result<CaptureOutcome> {
        if self.state() != RecorderState::Recording {
            return Ok(CaptureOutcome::Ignored);
        }

        self.frames.push(surface.snapshot());
        let captured = self.frames.len();
        if captured >= self.total_frames {
            return Ok(CaptureOutcome::Complete(self.stop()?));
        }
        Ok(CaptureOutcome::Captured {
            captured,
            total: self.total_frames,
        })
    }

    /// Recording -> Rendering; spawns the encode worker.
    pub fn stop(&mut self) -> Result<EncodeJob> {
        {
            let mut state = self.state.lock().expect("recorder state lock poisoned");
            if *state != RecorderState::Recording {
                return Err(Error::Validation(format!(
                    "cannot stop recording from {:?}",
                    *state
                )));
            }
            *state = RecorderState::Rendering;
        }

        let encoder = self
            .encoder
            .clone()
            .ok_or_else(|| Error::DependencyUnavailable("no frame encoder configured".into()))?;
        let frames = std::mem::take(&mut self.frames);
        let fps = self.fps;
        let total = frames.len();
        let state = Arc::clone(&self.state);
        let cancel = Arc::clone(&self.cancel);

        let (progress_tx, progress_rx) = channel();
        let (result_tx, result_rx) = channel();

        info!(frames = total, fps, "recording stopped, encoding");
        thread::spawn(move || {
            let mut on_frame = |encoded: usize| {
                let _ = progress_tx.send(EncodeProgress {
                    captured_frames: encoded,
                    total_frames: total,
                    progress: encoded as f32 / total.max(1) as f32,
                });
            };
            let outcome = match encoder.encode(&frames, fps, &cancel, &mut on_frame) {
                Ok(Some(bytes)) => {
                    *state.lock().expect("recorder state lock poisoned") =
                        RecorderState::Finished;
                    info!(frames = total, bytes = bytes.len(), "encode finished");
                    Ok(EncodeOutcome::Finished(EncodedAnimation {
                        bytes,
                        frame_count: total,
                        suggested_filename: format!("animation-{}.gif", unix_millis()),
                    }))
                }
                Ok(None) => {
                    *state.lock().expect("recorder state lock poisoned") =
                        RecorderState::Cancelled;
                    warn!(frames = total, "encode cancelled");
                    Ok(EncodeOutcome::Cancelled)
                }
                Err(e) => {
                    *state.lock().expect("recorder state lock poisoned") = RecorderState::Error;
                    warn!(error = %e, "encode failed");
                    Err(e)
                }
            };
            let _ = result_tx.send(outcome);
        });

        Ok(EncodeJob {
            progress: progress_rx,
            result: result_rx,
        })
    }

    /// Discards buffered frames and moves to Cancelled.
    ///
    /// From Rendering this only raises the token; the worker acknowledges it
    /// at the next frame boundary. Terminal states are left untouched.
    pub fn cancel(&mut self) {
        let mut state = self.state.lock().expect("recorder state lock poisoned");
        match *state {
            RecorderState::Idle | RecorderState::Recording => {
                self.frames.clear();
                *state = RecorderState::Cancelled;
                info!("recording cancelled");
            }
            RecorderState::Rendering => {
                self.cancel.store(true, Ordering::Relaxed);
                info!("encode cancellation requested");
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::surface::RasterSurface;

    /// Encoder stub producing fixed bytes without touching the gif codec.
    struct StubEncoder;

    impl FrameEncoder for StubEncoder {
        fn encode(
            &self,
            frames: &[RgbaImage],
            _fps: u32,
            cancel: &AtomicBool,
            on_frame: &mut dyn FnMut(usize),
        ) -> Result<Option<Vec<u8>>> {
            for i in 0..frames.len() {
                if cancel.load(Ordering::Relaxed) {
                    return Ok(None);
                }
                on_frame(i + 1);
            }
            Ok(Some(vec![0xAB; 4]))
        }
    }

    struct FailingEncoder;

    impl FrameEncoder for FailingEncoder {
        fn encode(
            &self,
            _frames: &[RgbaImage],
            _fps: u32,
            _cancel: &AtomicBool,
            _on_frame: &mut dyn FnMut(usize),
        ) -> Result<Option<Vec<u8>>> {
            Err(Error::Encode("boom".into()))
        }
    }

    fn recorder(encoder: Option<Arc<dyn FrameEncoder>>) -> FrameRecorder {
        // 2 fps * 1.5 s => 3 frames.
        FrameRecorder::new(2, 1.5, encoder)
    }

    #[test]
    fn start_without_encoder_fails_and_stays_idle() {
        let mut rec = recorder(None);
        let err = rec.start().unwrap_err();
        assert!(matches!(err, Error::DependencyUnavailable(_)));
        assert_eq!(rec.state(), RecorderState::Idle);
    }

    #[test]
    fn capture_outside_recording_is_ignored() {
        let mut rec = recorder(Some(Arc::new(StubEncoder)));
        let surface = RasterSurface::new(4, 4);
        assert!(matches!(
            rec.capture_frame(&surface).unwrap(),
            CaptureOutcome::Ignored
        ));
        assert_eq!(rec.captured_frames(), 0);
    }

    #[test]
    fn full_walk_reaches_finished_with_progress() {
        let mut rec = recorder(Some(Arc::new(StubEncoder)));
        rec.start().unwrap();
        assert_eq!(rec.state(), RecorderState::Recording);

        let surface = RasterSurface::new(4, 4);
        assert!(matches!(
            rec.capture_frame(&surface).unwrap(),
            CaptureOutcome::Captured { captured: 1, total: 3 }
        ));
        assert!(matches!(
            rec.capture_frame(&surface).unwrap(),
            CaptureOutcome::Captured { captured: 2, total: 3 }
        ));

        // Third capture hits the target and auto-stops.
        let CaptureOutcome::Complete(job) = rec.capture_frame(&surface).unwrap() else {
            panic!("expected auto-stop on final frame");
        };

        let outcome = job.wait().unwrap();
        let EncodeOutcome::Finished(animation) = outcome else {
            panic!("expected finished animation");
        };
        assert_eq!(animation.frame_count, 3);
        assert_eq!(animation.bytes, vec![0xAB; 4]);
        assert!(animation.suggested_filename.starts_with("animation-"));
        assert!(animation.suggested_filename.ends_with(".gif"));
        assert_eq!(rec.state(), RecorderState::Finished);
    }

    #[test]
    fn progress_reaches_one() {
        let mut rec = recorder(Some(Arc::new(StubEncoder)));
        rec.start().unwrap();
        let surface = RasterSurface::new(4, 4);
        rec.capture_frame(&surface).unwrap();
        rec.capture_frame(&surface).unwrap();
        let CaptureOutcome::Complete(job) = rec.capture_frame(&surface).unwrap() else {
            panic!("expected completion");
        };
        let updates: Vec<EncodeProgress> = job.progress.iter().collect();
        assert_eq!(updates.len(), 3);
        assert_eq!(updates.last().unwrap().progress, 1.0);
    }

    #[test]
    fn cancel_while_recording_discards_frames() {
        let mut rec = recorder(Some(Arc::new(StubEncoder)));
        rec.start().unwrap();
        let surface = RasterSurface::new(4, 4);
        rec.capture_frame(&surface).unwrap();
        rec.cancel();
        assert_eq!(rec.state(), RecorderState::Cancelled);
        assert_eq!(rec.captured_frames(), 0);

        // Terminal: further captures are ignored and cancel is a no-op.
        assert!(matches!(
            rec.capture_frame(&surface).unwrap(),
            CaptureOutcome::Ignored
        ));
        rec.cancel();
        assert_eq!(rec.state(), RecorderState::Cancelled);
    }

    #[test]
    fn encode_failure_lands_in_error_state() {
        let mut rec = recorder(Some(Arc::new(FailingEncoder)));
        rec.start().unwrap();
        let surface = RasterSurface::new(4, 4);
        rec.capture_frame(&surface).unwrap();
        let job = rec.stop().unwrap();
        assert!(job.wait().is_err());
        assert_eq!(rec.state(), RecorderState::Error);
    }

    #[test]
    fn stop_from_idle_is_rejected() {
        let mut rec = recorder(Some(Arc::new(StubEncoder)));
        assert!(rec.stop().is_err());
    }

    #[test]
    fn gif_encoder_produces_gif_bytes() {
        let frames = vec![RasterSurface::new(4, 4).snapshot(); 2];
        let cancel = AtomicBool::new(false);
        let mut seen = 0;
        let bytes = GifFrameEncoder
            .encode(&frames, 10, &cancel, &mut |i| seen = i)
            .unwrap()
            .unwrap();
        assert_eq!(seen, 2);
        assert_eq!(&bytes[..6], b"GIF89a");
    }

    #[test]
    fn gif_encoder_acknowledges_cancellation() {
        let frames = vec![RasterSurface::new(4, 4).snapshot(); 2];
        let cancel = AtomicBool::new(true);
        let result = GifFrameEncoder
            .encode(&frames, 10, &cancel, &mut |_| {})
            .unwrap();
        assert!(result.is_none());
    }
}
