use crate::constants::{
    DEFAULT_BLUR_RADIUS, DEFAULT_EXTENSION, DEFAULT_PALETTE, HELP, OUTPUT_IMAGE_NAME,
    PACKAGED_PALETTES_DIR, PROGRAM_NAME, VERSION,
};
use crate::error::{AppError, Result};
use crate::flags::{split_args, PaletteFlag, FLAGS};
use crate::palettes::{set_file_name, PaletteCatalog, PaletteEntry};
use crate::report::Reporter;
use crate::types::{InvocationConfig, PaletteSelection, PixelsArea, Resolution};

use clap::error::ErrorKind;
use clap::{ArgMatches, Command};
use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use serde_derive::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    pub palettes_dir: String,
    pub blur_radius: f32,
}

pub fn load_settings(
    config_path: Option<&Path>,
) -> std::result::Result<Settings, config::ConfigError> {
    let mut builder = ConfigBuilder::<DefaultState>::default()
        .set_default("palettes_dir", PACKAGED_PALETTES_DIR)?
        .set_default("blur_radius", f64::from(DEFAULT_BLUR_RADIUS))?;

    if let Some(home) = dirs::home_dir() {
        let default_config_path = home.join(".config/gonord/config.toml");
        if default_config_path.exists() {
            builder = builder.add_source(File::from(default_config_path).required(false));
        }
    }

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path.to_path_buf()).required(true));
    }

    builder.build()?.try_deserialize()
}

fn command() -> Command<'static> {
    FLAGS.iter().fold(
        Command::new(PROGRAM_NAME)
            .version(VERSION.trim())
            .override_help(HELP)
            .disable_help_flag(true)
            .disable_version_flag(true),
        |cmd, flag| cmd.arg(flag.to_arg()),
    )
}

/// Turns argv into an [`InvocationConfig`], reporting what was picked on the way.
///
/// Palette options are not known to clap: they are matched against the
/// palette catalog once the regular flags are parsed.
pub fn init<I, S, W>(argv: I, reporter: &mut Reporter<W>) -> Result<Resolution>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    W: Write,
{
    let split = split_args(argv);

    // Decided before clap runs so a rejected command line stays quiet too.
    reporter.set_quiet(split.known.iter().any(|token| token == "--quiet"));

    let matches = match command().try_get_matches_from(&split.known) {
        Ok(matches) => matches,
        Err(e) if e.kind() == ErrorKind::DisplayHelp => {
            return Ok(Resolution::Exit(HELP.to_string()))
        }
        Err(e) if e.kind() == ErrorKind::DisplayVersion => {
            return Ok(Resolution::Exit(VERSION.trim().to_string()))
        }
        Err(e) => return Err(e.into()),
    };

    let settings = load_settings(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    let catalog = PaletteCatalog::load_or_builtin(
        Path::new(&settings.palettes_dir),
        settings.palettes_dir == PACKAGED_PALETTES_DIR,
    )?;

    resolve(&matches, &split.unknown, &catalog, &settings, reporter).map(Resolution::Run)
}

fn resolve<W: Write>(
    matches: &ArgMatches,
    unknown: &[String],
    catalog: &PaletteCatalog,
    settings: &Settings,
    reporter: &mut Reporter<W>,
) -> Result<InvocationConfig> {
    let input_path = matches
        .get_one::<PathBuf>("input_path")
        .cloned()
        .ok_or_else(|| AppError::Usage("the input image path (-i/--img) is required".into()))?;
    reporter.info(format!("Loading input image: {}", input_path.display()));

    let output_path = with_default_extension(
        matches
            .get_one::<PathBuf>("output_path")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(OUTPUT_IMAGE_NAME)),
    );
    reporter.info(format!("Set output image name: {}", output_path.display()));

    let blur = flag(matches, "enable_blur");
    if blur {
        reporter.info("Blur enabled");
    }

    let averaging = !flag(matches, "disable_avg_pixels");
    if !averaging {
        reporter.info("No average pixels selected for algorithm optimization");
    }

    let pixels_area = matches.get_one::<PixelsArea>("pixels_area").copied();
    if let Some(area) = pixels_area {
        reporter.info(format!("Set up pixels width area: {}", area.width));
        reporter.info(format!("Set up pixels height area: {}", area.height));
    }

    let palette = resolve_palette(catalog, unknown, reporter)?;

    Ok(InvocationConfig {
        input_path,
        output_path,
        quiet: reporter.is_quiet(),
        blur,
        averaging,
        pixels_area,
        palette,
        blur_radius: settings.blur_radius,
    })
}

/// Replays palette options in argv order.
///
/// Each palette option points the lookup at its directory and resets the
/// palette. Only options that end up adding a set count as a change; when
/// none did, the whole default palette is used.
fn resolve_palette<W: Write>(
    catalog: &PaletteCatalog,
    unknown: &[String],
    reporter: &mut Reporter<W>,
) -> Result<PaletteSelection> {
    let mut current: Option<PaletteSelection> = None;
    let mut changed = false;

    for token in unknown {
        let entry = match PaletteFlag::parse(token)
            .and_then(|flag| catalog.find(&flag.name).map(|entry| (flag, entry)))
        {
            Some(found) => found,
            None => {
                let available: Vec<&str> = catalog.names().collect();
                reporter.warning(format!(
                    "Unknown option ignored: {} (palettes: {})",
                    token,
                    available.join(", ")
                ));
                continue;
            }
        };
        let (flag, entry) = entry;
        let sets = entry.color_sets()?;
        let mut selection = empty_selection(entry);

        match &flag.sets {
            Some(requested) => {
                reporter.info(format!("Use palette set: {}", entry.display_name));
                for wanted in requested {
                    match sets.iter().find(|set| set.to_lowercase() == *wanted) {
                        Some(set) => {
                            selection.files.push(set_file_name(set));
                            reporter.accepted(set);
                            changed = true;
                        }
                        None => reporter.warning(format!("No set found for: {} \u{2753}", wanted)),
                    }
                }
                for set in &sets {
                    if !requested.contains(&set.to_lowercase()) {
                        reporter.rejected(set);
                    }
                }
            }
            None => {
                changed = true;
                reporter.info(format!("Use all color set: {}", entry.display_name));
                selection.files = sets.iter().map(|set| set_file_name(set)).collect();
            }
        }

        current = Some(selection);
    }

    match current {
        Some(selection) if changed => Ok(selection),
        _ => {
            reporter.warning("No theme specified, use default Nord theme");
            let builtin = PaletteCatalog::builtin();
            let entry = catalog
                .find(DEFAULT_PALETTE)
                .or_else(|| builtin.find(DEFAULT_PALETTE))
                .ok_or_else(|| {
                    AppError::Palette(format!(
                        "default palette '{}' not found in {}",
                        DEFAULT_PALETTE,
                        catalog.root().display()
                    ))
                })?;
            let mut selection = empty_selection(entry);
            selection.files = entry
                .color_sets()?
                .iter()
                .map(|set| set_file_name(set))
                .collect();
            Ok(selection)
        }
    }
}

fn empty_selection(entry: &PaletteEntry) -> PaletteSelection {
    PaletteSelection {
        name: entry.key.clone(),
        lookup_dir: entry.dir.clone(),
        files: Vec::new(),
    }
}

fn flag(matches: &ArgMatches, id: &str) -> bool {
    matches.get_one::<bool>(id).copied().unwrap_or(false)
}

pub fn with_default_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension(DEFAULT_EXTENSION);
    }
    path
}
