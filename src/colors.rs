/// Palettes compiled into the binary, used when the packaged
/// `palettes/` directory is not next to it anymore.
pub struct BuiltinSet {
    pub name: &'static str,
    pub colors: &'static str,
}

pub struct BuiltinPalette {
    pub name: &'static str,
    pub sets: &'static [BuiltinSet],
}

/// Root of the virtual directory built-in palettes are looked up under.
pub const BUILTIN_ROOT: &str = "<builtin>";

pub const NORD: BuiltinPalette = BuiltinPalette {
    name: "Nord",
    sets: &[
        BuiltinSet {
            name: "Aurora",
            colors: include_str!("../palettes/Nord/Aurora.txt"),
        },
        BuiltinSet {
            name: "Frost",
            colors: include_str!("../palettes/Nord/Frost.txt"),
        },
        BuiltinSet {
            name: "PolarNight",
            colors: include_str!("../palettes/Nord/PolarNight.txt"),
        },
        BuiltinSet {
            name: "SnowStorm",
            colors: include_str!("../palettes/Nord/SnowStorm.txt"),
        },
    ],
};

pub const MONOKAI: BuiltinPalette = BuiltinPalette {
    name: "Monokai",
    sets: &[
        BuiltinSet {
            name: "Accents",
            colors: include_str!("../palettes/Monokai/Accents.txt"),
        },
        BuiltinSet {
            name: "Base",
            colors: include_str!("../palettes/Monokai/Base.txt"),
        },
    ],
};

pub const BUILTIN_PALETTES: &[BuiltinPalette] = &[MONOKAI, NORD];

pub fn find_builtin(name: &str) -> Option<&'static BuiltinPalette> {
    BUILTIN_PALETTES
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

impl BuiltinPalette {
    pub fn find_set(&self, name: &str) -> Option<&'static BuiltinSet> {
        let sets: &'static [BuiltinSet] = self.sets;
        sets.iter().find(|s| s.name == name)
    }
}
