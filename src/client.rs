use crate::config::init;
use crate::engine::{GoNord, PaletteEngine};
use crate::error::Result;
use crate::report::Reporter;
use crate::types::{InvocationConfig, Resolution};

use std::io::Write;

use indicatif::ProgressBar;

/// Replays a resolved configuration onto the engine and converts once.
pub fn apply<E: PaletteEngine>(config: &InvocationConfig, engine: &mut E) -> Result<()> {
    let image = engine.open_image(&config.input_path)?;

    if config.blur {
        engine.enable_gaussian_blur();
    }

    if !config.averaging {
        engine.disable_avg_algorithm();
    }

    if let Some(area) = config.pixels_area {
        engine.set_avg_box_data(area.width, area.height);
    }

    engine.reset_palette();
    engine.set_palette_lookup_path(&config.palette.lookup_dir);
    for file in &config.palette.files {
        engine.add_file_to_palette(file)?;
    }

    engine.convert_image(image, &config.output_path)
}

/// What the binary does with argv, minus process exit handling.
pub fn run<I, S, W>(argv: I, reporter: &mut Reporter<W>) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    W: Write,
{
    match init(argv, reporter)? {
        Resolution::Exit(text) => {
            println!("{}", text.trim_end());
            Ok(())
        }
        Resolution::Run(config) => {
            let pb = if config.quiet {
                ProgressBar::hidden()
            } else {
                reporter.progress_bar(0)
            };
            pb.set_prefix(config.palette.name.clone());
            let mut engine = GoNord::new(config.blur_radius, pb);
            apply(&config, &mut engine)
        }
    }
}
