pub const VERSION: &str = include_str!("../VERSION");

pub const PROGRAM_NAME: &str = "image-go-nord-client";

pub const DEFAULT_EXTENSION: &str = "png";
pub const OUTPUT_IMAGE_NAME: &str = "nord.png";

pub const DEFAULT_PALETTE: &str = "nord";
pub const PALETTE_FILE_EXTENSION: &str = "txt";

/// Palettes shipped next to the crate sources.
pub const PACKAGED_PALETTES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/palettes");

pub const DEFAULT_BLUR_RADIUS: f32 = 2.0;

pub const DEFAULT_AVG_BOX_WIDTH: u32 = 5;
pub const DEFAULT_AVG_BOX_HEIGHT: u32 = 5;

pub const HELP: &str = "ImageGoNord, a converter for a rgb images to norththeme palette.
Usage: image-go-nord-client [OPTION]...

Mandatory arguments to long options are mandatory for short options too.

Startup:
  -h,  --help                       print this help and exit
  -v,  --version                    show version number and exit
  -c,  --config=PATH                read settings from PATH instead of
                                    ~/.config/gonord/config.toml

Image options:
  -i,  --img=PATH                   specify input image path (required)
  -o,  --out=PATH                   specify output image path, '.png' is
                                    added when PATH has no extension
                                    (default: nord.png)
  -q,  --quiet                      quiet (no output)
  -b,  --blur                       use blur on the final result
  -na, --no-avg                     do not use the average pixels
                                    optimization algorithm on conversion
  -pa, --pixels-area=INT[,INT]      specify pixels of the area for average
                                    color calculation

Theme options:
  --PALETTE[=LIST_COLOR_SET]        the palettes can be found in the
                                    palettes/ directory, by replacing
                                    'PALETTE' with a theme name it is
                                    possible to select it. If necessary you
                                    can specify the set of colors you want
                                    to use.
                                    Ex: image-go-nord-client --nord=Aurora,PolarNight,SnowStorm
                                    Ex: image-go-nord-client --monokai

Email bug reports, questions, discussions to <schrodinger.hat.show@gmail.com>
and/or open issues at https://github.com/Schrodinger-Hat/ImageGoNord/issues/new
";
