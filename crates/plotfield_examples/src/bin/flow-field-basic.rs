use plotfield::prelude::*;
use plotfield_examples::{init_tracing, write_bytes, write_svg};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let seed = 2025u64;
    let (width, height) = (800.0f32, 600.0f32);

    // Curl noise keeps the streamlines organic and non-crossing.
    let field = FieldGenerator::try_new(
        FieldConfig::new(FieldMode::Curl).with_noise_scale(0.004),
        Box::new(PerlinNoise::new(seed)),
    )?;

    let tracer = PathTracer::try_new(
        TraceConfig::new(800)
            .with_steps(120)
            .with_step_length(2.0)
            .with_margin(20.0)
            .with_fade_distance(50.0),
    )?;

    let mut rng = StdRng::seed_from_u64(seed);
    let polylines = tracer.trace(&field, width, height, &mut rng)?;

    let doc = render_polylines(&polylines, width, height, &FlowRenderConfig::default());

    // Screen SVG keeps the background; plotter SVG is stroke-only.
    let screen = transform_for_mode(&doc, &ExportSettings::new(RenderMode::Screen));
    let plotter = transform_for_mode(&doc, &ExportSettings::new(RenderMode::Plotter));

    let name = ExportFilename::new("flow-field", "svg").with_seed(seed);
    write_svg(name.clone().with_mode("screen").build(), &serialize(&screen))?;
    write_svg(name.with_mode("plotter").build(), &serialize(&plotter))?;

    // PNG snapshot of the screen rendering.
    let surface = RasterSurface::from_document(&screen);
    let png = RasterExporter::new().export(&surface, None)?;
    write_bytes(
        ExportFilename::new("flow-field", "png")
            .with_mode("screen")
            .with_seed(seed)
            .build(),
        &png,
    )?;

    // Suggest a paper fit for plotting.
    let catalog = PaperCatalog::new();
    let fit = fit_to_paper(width, height, &catalog.preset(PaperSize::A4), 50.0)?;
    println!(
        "A4 fit: scale {:.3}, offset ({:.1}, {:.1})",
        fit.scale, fit.offset_x, fit.offset_y
    );

    // Remember the parameters that produced this plot.
    let mut store = ParameterStore::new(Box::new(DirStorage::new("presets")));
    let ns = Namespace::new("plotfield", "flow-field");
    let params = ParameterSet::new("flow-field")
        .with_number("seed", seed as f64)
        .with_number("noise_scale", 0.004)
        .with_number("particle_count", 800.0)
        .with_bool("curl_noise", true);
    store.save(&ns, "latest", &params)?;

    Ok(())
}
