use crate::colors::{find_builtin, BuiltinPalette, BUILTIN_PALETTES, BUILTIN_ROOT};
use crate::constants::PALETTE_FILE_EXTENSION;
use crate::error::{AppError, Result};

use std::fs;
use std::path::{Path, PathBuf};

use image::Rgb;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Lowercased directory name, what `--<key>` selects.
    pub key: String,
    /// Directory name as found on disk, used when talking to the user.
    pub display_name: String,
    pub dir: PathBuf,
}

impl PaletteEntry {
    /// Color set names (file stems), sorted so listings are stable.
    pub fn color_sets(&self) -> Result<Vec<String>> {
        if let Some(builtin) = builtin_palette(&self.dir) {
            let mut sets: Vec<String> = builtin.sets.iter().map(|s| s.name.to_string()).collect();
            sets.sort();
            return Ok(sets);
        }

        let mut sets = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(PALETTE_FILE_EXTENSION)
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                sets.push(stem.to_string());
            }
        }
        sets.sort();
        Ok(sets)
    }
}

/// Every palette found below one root directory.
#[derive(Debug, Clone)]
pub struct PaletteCatalog {
    root: PathBuf,
    entries: Vec<PaletteEntry>,
}

impl PaletteCatalog {
    pub fn load(root: &Path) -> Result<Self> {
        let listing = fs::read_dir(root).map_err(|e| {
            AppError::Palette(format!(
                "cannot read palette directory {}: {}",
                root.display(),
                e
            ))
        })?;

        let mut entries = Vec::new();
        for entry in listing {
            let dir = entry?.path();
            if !dir.is_dir() {
                continue;
            }
            if let Some(name) = dir.file_name().and_then(|n| n.to_str()) {
                entries.push(PaletteEntry {
                    key: name.to_lowercase(),
                    display_name: name.to_string(),
                    dir: dir.clone(),
                });
            }
        }
        entries.sort_by(|a, b| a.key.cmp(&b.key));

        Ok(PaletteCatalog {
            root: root.to_path_buf(),
            entries,
        })
    }

    /// Catalog of the palettes compiled into the binary.
    pub fn builtin() -> Self {
        let mut entries: Vec<PaletteEntry> = BUILTIN_PALETTES
            .iter()
            .map(|p| PaletteEntry {
                key: p.name.to_lowercase(),
                display_name: p.name.to_string(),
                dir: Path::new(BUILTIN_ROOT).join(p.name),
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));

        PaletteCatalog {
            root: PathBuf::from(BUILTIN_ROOT),
            entries,
        }
    }

    /// Like [`PaletteCatalog::load`], but a missing `root` falls back to the
    /// built-in palettes when `fallback` is set.
    pub fn load_or_builtin(root: &Path, fallback: bool) -> Result<Self> {
        if fallback && !root.is_dir() {
            return Ok(PaletteCatalog::builtin());
        }
        PaletteCatalog::load(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn find(&self, name: &str) -> Option<&PaletteEntry> {
        let key = name.to_lowercase();
        self.entries.iter().find(|e| e.key == key)
    }
}

pub fn set_file_name(set: &str) -> String {
    format!("{}.{}", set, PALETTE_FILE_EXTENSION)
}

/// Reads one color set file: a hex color per line, `#` optional.
/// Blank lines and lines starting with `;` are skipped.
pub fn read_color_set(path: &Path) -> Result<Vec<Rgb<u8>>> {
    if let Some(builtin) = path.parent().and_then(builtin_palette) {
        let set = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|stem| builtin.find_set(stem))
            .ok_or_else(|| {
                AppError::Palette(format!("no built-in color set {}", path.display()))
            })?;
        return parse_color_set(set.colors, path);
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AppError::Palette(format!("cannot read color set {}: {}", path.display(), e))
    })?;
    parse_color_set(&contents, path)
}

/// Built-in palette a `<builtin>/<Name>` directory stands for.
fn builtin_palette(dir: &Path) -> Option<&'static BuiltinPalette> {
    if dir.parent() != Some(Path::new(BUILTIN_ROOT)) {
        return None;
    }
    dir.file_name().and_then(|n| n.to_str()).and_then(find_builtin)
}

fn parse_color_set(contents: &str, path: &Path) -> Result<Vec<Rgb<u8>>> {
    let mut colors = Vec::new();
    for (number, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        let color = hex_to_rgb(line).ok_or_else(|| {
            AppError::Palette(format!(
                "{}:{}: '{}' is not a hex color",
                path.display(),
                number + 1,
                line
            ))
        })?;
        colors.push(color);
    }
    Ok(colors)
}

pub fn hex_to_rgb(hex: &str) -> Option<Rgb<u8>> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Rgb([r, g, b]))
}
