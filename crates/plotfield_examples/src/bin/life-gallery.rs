use plotfield::prelude::*;
use plotfield_examples::{init_tracing, write_svg};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Still lifes side by side.
    let mut stills = Automaton::try_new(20, 10)?;
    stills.load_pattern(&patterns::block(), 2, 3);
    stills.load_pattern(&patterns::beehive(), 8, 3);
    let doc = render_grid(
        &stills.grid(),
        &CellRenderConfig::new(CellRenderStyle::Squares).with_cell_size(12.0),
    );
    write_svg("life-still-lifes.svg", &serialize(&doc))?;

    // Blinker phases as circles.
    let mut blinker = Automaton::try_new(7, 7)?;
    blinker.load_pattern(&patterns::blinker(), 2, 3);
    for phase in 0..4 {
        let doc = render_grid(
            &blinker.grid(),
            &CellRenderConfig::new(CellRenderStyle::Circles).with_cell_size(15.0),
        );
        write_svg(format!("life-blinker-phase-{phase}.svg"), &serialize(&doc))?;
        blinker.step();
    }

    // Glider evolution, plotter-ready.
    let mut glider = Automaton::try_new(16, 16)?;
    glider.load_pattern(&patterns::glider(), 1, 1);
    let settings = ExportSettings::new(RenderMode::Plotter);
    for generation in [0u32, 4, 8, 12] {
        while glider.generation() < generation as u64 {
            glider.step();
        }
        let doc = render_grid(
            &glider.grid(),
            &CellRenderConfig::new(CellRenderStyle::Dots).with_cell_size(8.0),
        );
        let plotter = transform_for_mode(&doc, &settings);
        write_svg(
            ExportFilename::new("life-glider", "svg")
                .with_mode("plotter")
                .with_iteration(generation)
                .build(),
            &serialize(&plotter),
        )?;
    }

    // R-pentomino chaos: report population at key generations.
    let mut chaos = Automaton::try_new(60, 60)?;
    chaos.load_pattern(&patterns::r_pentomino(), 28, 28);
    for generation in 0..=100u64 {
        if matches!(generation, 0 | 10 | 50 | 100) {
            println!(
                "r-pentomino generation {generation}: {} cells",
                chaos.count_living_cells()
            );
        }
        chaos.step();
    }

    Ok(())
}
