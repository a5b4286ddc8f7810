use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct InvocationConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub quiet: bool,
    pub blur: bool,
    pub averaging: bool,
    pub pixels_area: Option<PixelsArea>,
    pub palette: PaletteSelection,
    pub blur_radius: f32,
}

/// Averaging box given with `--pixels-area=W[,H]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelsArea {
    pub width: u32,
    pub height: u32,
}

/// Final state of the engine palette once every palette flag was replayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteSelection {
    pub name: String,
    pub lookup_dir: PathBuf,
    /// Color set file names, e.g. `Aurora.txt`, in the order they are added.
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Run(InvocationConfig),
    /// Help or version text; the process prints it and exits successfully.
    Exit(String),
}
