use std::sync::Arc;

use plotfield::prelude::*;
use plotfield_examples::{init_tracing, write_bytes};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut life = Automaton::try_new(24, 24)?;
    life.load_pattern(&patterns::glider(), 1, 1);
    life.load_pattern(&patterns::blinker(), 14, 10);

    let config = CellRenderConfig::new(CellRenderStyle::Squares)
        .with_cell_size(8.0)
        .with_margin(8.0);

    // 10 fps for 2 seconds: 20 generations.
    let mut recorder = FrameRecorder::new(10, 2.0, Some(Arc::new(GifFrameEncoder)));
    recorder.start()?;

    let job = loop {
        let doc = render_grid(&life.grid(), &config);
        let surface = RasterSurface::from_document(&doc);
        match recorder.capture_frame(&surface)? {
            CaptureOutcome::Complete(job) => break job,
            CaptureOutcome::Captured { .. } => life.step(),
            CaptureOutcome::Ignored => unreachable!("recorder stopped unexpectedly"),
        }
    };

    for update in job.progress.iter() {
        println!(
            "encoding {}/{} ({:.0}%)",
            update.captured_frames,
            update.total_frames,
            update.progress * 100.0
        );
    }

    match job.wait()? {
        EncodeOutcome::Finished(animation) => {
            write_bytes(&animation.suggested_filename, &animation.bytes)?;
            println!("{} frames encoded", animation.frame_count);
        }
        EncodeOutcome::Cancelled => println!("recording cancelled"),
    }

    Ok(())
}
