use crate::types::PixelsArea;

use clap::{value_parser, Arg, ArgAction};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    Switch,
    Path,
    PixelsArea,
    Help,
    Version,
}

/// One command line option, with both spellings.
#[derive(Debug, Clone, Copy)]
pub struct FlagDef {
    pub id: &'static str,
    /// Without the leading dash; may be more than one character (`na`).
    pub short: &'static str,
    pub long: &'static str,
    pub kind: FlagKind,
    pub required: bool,
}

pub const FLAGS: &[FlagDef] = &[
    FlagDef {
        id: "show_help",
        short: "h",
        long: "help",
        kind: FlagKind::Help,
        required: false,
    },
    FlagDef {
        id: "show_version",
        short: "v",
        long: "version",
        kind: FlagKind::Version,
        required: false,
    },
    FlagDef {
        id: "config",
        short: "c",
        long: "config",
        kind: FlagKind::Path,
        required: false,
    },
    FlagDef {
        id: "input_path",
        short: "i",
        long: "img",
        kind: FlagKind::Path,
        required: true,
    },
    FlagDef {
        id: "output_path",
        short: "o",
        long: "out",
        kind: FlagKind::Path,
        required: false,
    },
    FlagDef {
        id: "quiet_mode",
        short: "q",
        long: "quiet",
        kind: FlagKind::Switch,
        required: false,
    },
    FlagDef {
        id: "enable_blur",
        short: "b",
        long: "blur",
        kind: FlagKind::Switch,
        required: false,
    },
    FlagDef {
        id: "disable_avg_pixels",
        short: "na",
        long: "no-avg",
        kind: FlagKind::Switch,
        required: false,
    },
    FlagDef {
        id: "pixels_area",
        short: "pa",
        long: "pixels-area",
        kind: FlagKind::PixelsArea,
        required: false,
    },
];

impl FlagDef {
    pub fn to_arg(&self) -> Arg<'static> {
        let arg = Arg::new(self.id).long(self.long).required(self.required);
        match self.kind {
            FlagKind::Switch => arg.action(ArgAction::SetTrue),
            FlagKind::Help => arg.action(ArgAction::Help),
            FlagKind::Version => arg.action(ArgAction::Version),
            FlagKind::Path => arg
                .action(ArgAction::Set)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf)),
            FlagKind::PixelsArea => arg
                .action(ArgAction::Set)
                .value_name("INT[,INT]")
                .value_parser(parse_pixels_area),
        }
    }

    fn takes_value(&self) -> bool {
        matches!(self.kind, FlagKind::Path | FlagKind::PixelsArea)
    }
}

pub fn lookup_short(name: &str) -> Option<&'static FlagDef> {
    FLAGS.iter().find(|f| f.short == name)
}

pub fn lookup_long(name: &str) -> Option<&'static FlagDef> {
    FLAGS.iter().find(|f| f.long == name)
}

/// argv split into what clap should see and what it should not.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SplitArgs {
    /// Program name followed by known flags, all in long form.
    pub known: Vec<String>,
    /// Everything that looks like an option but is not in [`FLAGS`],
    /// in argv order. Palette flags end up here.
    pub unknown: Vec<String>,
}

/// Rewrites short spellings to their long form and sets aside unknown options.
pub fn split_args<I, S>(argv: I) -> SplitArgs
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut split = SplitArgs::default();
    let mut argv = argv.into_iter().map(Into::into);
    if let Some(program) = argv.next() {
        split.known.push(program);
    }

    let mut expecting_value = false;
    for token in argv {
        if expecting_value && !token.starts_with('-') {
            split.known.push(token);
            expecting_value = false;
            continue;
        }
        expecting_value = false;

        let (name, value) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token.as_str(), None),
        };

        let def = if let Some(long) = name.strip_prefix("--") {
            lookup_long(long)
        } else if let Some(short) = name.strip_prefix('-') {
            lookup_short(short)
        } else {
            // Stray positional, warned about and ignored like unknown options.
            split.unknown.push(token);
            continue;
        };

        match def {
            Some(def) => {
                let long = match value {
                    Some(value) => format!("--{}={}", def.long, value),
                    None => format!("--{}", def.long),
                };
                expecting_value = value.is_none() && def.takes_value();
                split.known.push(long);
            }
            None => split.unknown.push(token),
        }
    }
    split
}

/// A `--<palette>[=set,...]` option taken from the unknown arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteFlag {
    /// Lowercased flag name without dashes.
    pub name: String,
    /// Requested color sets, lowercased; `None` selects the whole palette.
    pub sets: Option<Vec<String>>,
}

impl PaletteFlag {
    /// Returns `None` for anything that is not a long option.
    pub fn parse(token: &str) -> Option<Self> {
        let rest = token.strip_prefix("--")?;
        let (name, value) = match rest.split_once('=') {
            Some((name, value)) => (name, value),
            None => (rest, ""),
        };
        if name.is_empty() {
            return None;
        }

        let sets = if value.is_empty() {
            None
        } else {
            Some(value.split(',').map(|s| s.trim().to_lowercase()).collect())
        };

        Some(PaletteFlag {
            name: name.to_lowercase(),
            sets,
        })
    }
}

pub fn parse_pixels_area(value: &str) -> Result<PixelsArea, String> {
    if value.is_empty() {
        return Err(format!("Invalid value for pixels area: {}", value));
    }

    let values: Vec<&str> = value.split(',').collect();
    if values.len() > 2 {
        return Err(format!(
            "Invalid number of parameters for pixels area: {}",
            value
        ));
    }

    let mut parsed = Vec::with_capacity(values.len());
    for v in &values {
        let n = match v.parse::<u32>() {
            Ok(n) if !v.is_empty() && v.chars().all(|c| c.is_ascii_digit()) => n,
            _ => {
                return Err(format!(
                    "Invalid value for pixels area, all should be integer: {}",
                    value
                ))
            }
        };
        if n == 0 {
            return Err(format!(
                "Invalid value for pixels area, all should be positive: {}",
                value
            ));
        }
        parsed.push(n);
    }

    let width = parsed[0];
    let height = parsed.get(1).copied().unwrap_or(width);
    Ok(PixelsArea { width, height })
}
