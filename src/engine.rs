use crate::constants::{DEFAULT_AVG_BOX_HEIGHT, DEFAULT_AVG_BOX_WIDTH};
use crate::error::{AppError, Result};
use crate::palettes::read_color_set;
use crate::types::PixelsArea;
use crate::utils::{box_average, compute_integral_image, rgb_to_lab};

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::{imageops, DynamicImage, Rgb, RgbImage};
use indicatif::ProgressBar;
use palette::color_difference::ImprovedCiede2000;
use palette::Lab;

/// The conversion library as seen by the client.
pub trait PaletteEngine {
    type Image;

    fn open_image(&mut self, path: &Path) -> Result<Self::Image>;
    fn enable_gaussian_blur(&mut self);
    fn disable_avg_algorithm(&mut self);
    fn set_avg_box_data(&mut self, w: u32, h: u32);
    fn reset_palette(&mut self);
    fn set_palette_lookup_path(&mut self, dir: &Path);
    /// Loads a color set file relative to the current lookup path.
    fn add_file_to_palette(&mut self, file: &str) -> Result<()>;
    fn convert_image(&mut self, image: Self::Image, save_path: &Path) -> Result<()>;
}

#[derive(Debug, Clone, Copy)]
struct PaletteColor {
    rgb: Rgb<u8>,
    lab: Lab,
}

pub struct ColorMap(HashMap<[u8; 3], Rgb<u8>>);

impl ColorMap {
    pub fn new() -> Self {
        ColorMap(HashMap::with_capacity(1024))
    }

    pub fn get(&self, key: &[u8; 3]) -> Option<Rgb<u8>> {
        self.0.get(key).copied()
    }

    pub fn insert(&mut self, key: [u8; 3], value: Rgb<u8>) {
        self.0.insert(key, value);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

pub struct GoNord {
    lookup_path: PathBuf,
    palette: Vec<PaletteColor>,
    color_map: ColorMap,
    blur: bool,
    blur_radius: f32,
    averaging: bool,
    avg_box: PixelsArea,
    pb: ProgressBar,
}

impl GoNord {
    pub fn new(blur_radius: f32, pb: ProgressBar) -> Self {
        GoNord {
            lookup_path: PathBuf::new(),
            palette: Vec::new(),
            color_map: ColorMap::new(),
            blur: false,
            blur_radius,
            averaging: true,
            avg_box: PixelsArea {
                width: DEFAULT_AVG_BOX_WIDTH,
                height: DEFAULT_AVG_BOX_HEIGHT,
            },
            pb,
        }
    }

    /// Maps every pixel (or its box average) onto the closest palette color.
    pub fn quantize(&mut self, img: &RgbImage) -> RgbImage {
        let (width, height) = img.dimensions();
        self.pb.set_length(height as u64);
        self.pb.set_message("Mapping pixels to the palette");

        let integral_image = self.averaging.then(|| compute_integral_image(img));
        let mut output = RgbImage::new(width, height);

        for y in 0..height {
            for x in 0..width {
                let source = match &integral_image {
                    Some(integral) => box_average(x, y, width, height, self.avg_box, integral),
                    None => *img.get_pixel(x, y),
                };
                let mapped = self.memoized_find_closest_color(source);
                output.put_pixel(x, y, mapped);
            }
            self.pb.inc(1);
        }

        output
    }

    fn memoized_find_closest_color(&mut self, pixel: Rgb<u8>) -> Rgb<u8> {
        let key = [pixel[0], pixel[1], pixel[2]];

        if let Some(rgb) = self.color_map.get(&key) {
            return rgb;
        }

        let closest = find_closest_color(&rgb_to_lab(pixel), &self.palette)
            .map(|c| c.rgb)
            .unwrap_or(pixel);
        self.color_map.insert(key, closest);

        closest
    }
}

impl PaletteEngine for GoNord {
    type Image = DynamicImage;

    fn open_image(&mut self, path: &Path) -> Result<DynamicImage> {
        Ok(image::open(path)?)
    }

    fn enable_gaussian_blur(&mut self) {
        self.blur = true;
    }

    fn disable_avg_algorithm(&mut self) {
        self.averaging = false;
    }

    fn set_avg_box_data(&mut self, w: u32, h: u32) {
        self.avg_box = PixelsArea {
            width: w.max(1),
            height: h.max(1),
        };
    }

    fn reset_palette(&mut self) {
        self.palette.clear();
        self.color_map.clear();
    }

    fn set_palette_lookup_path(&mut self, dir: &Path) {
        self.lookup_path = dir.to_path_buf();
    }

    fn add_file_to_palette(&mut self, file: &str) -> Result<()> {
        let colors = read_color_set(&self.lookup_path.join(file))?;
        self.palette.extend(colors.into_iter().map(|rgb| PaletteColor {
            rgb,
            lab: rgb_to_lab(rgb),
        }));
        self.color_map.clear();
        Ok(())
    }

    fn convert_image(&mut self, image: DynamicImage, save_path: &Path) -> Result<()> {
        if self.palette.is_empty() {
            return Err(AppError::EmptyPalette);
        }

        let output = self.quantize(&image.to_rgb8());
        let output = if self.blur {
            self.pb.set_message("Blurring");
            imageops::blur(&output, self.blur_radius)
        } else {
            output
        };

        output.save(save_path)?;
        self.pb.finish_with_message(format!("Saved to {}", save_path.display()));
        Ok(())
    }
}

fn find_closest_color<'a>(original: &Lab, colors: &'a [PaletteColor]) -> Option<&'a PaletteColor> {
    colors.iter().min_by(|a, b| {
        original
            .improved_difference(a.lab)
            .partial_cmp(&original.improved_difference(b.lab))
            .unwrap_or(Ordering::Equal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PACKAGED_PALETTES_DIR;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gonord-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn grays_engine(dir: &Path) -> GoNord {
        fs::write(dir.join("Grays.txt"), "000000\n808080\nFFFFFF\n").unwrap();
        let mut engine = GoNord::new(1.0, ProgressBar::hidden());
        engine.set_palette_lookup_path(dir);
        engine.add_file_to_palette("Grays.txt").unwrap();
        engine
    }

    fn strip(values: &[u8]) -> RgbImage {
        let mut img = RgbImage::new(values.len() as u32, 1);
        for (x, v) in values.iter().enumerate() {
            img.put_pixel(x as u32, 0, Rgb([*v, *v, *v]));
        }
        img
    }

    #[test]
    fn test_closest_palette_color() {
        let dir = scratch_dir("closest");
        let mut engine = grays_engine(&dir);
        engine.disable_avg_algorithm();

        let out = engine.quantize(&strip(&[20, 120, 240]));
        let _ = fs::remove_dir_all(&dir);

        assert_eq!(out.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(out.get_pixel(1, 0), &Rgb([0x80, 0x80, 0x80]));
        assert_eq!(out.get_pixel(2, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_averaging_changes_the_mapping() {
        let dir = scratch_dir("averaging");
        let mut engine = grays_engine(&dir);
        let img = strip(&[0, 255, 0]);

        engine.set_avg_box_data(3, 1);
        let averaged = engine.quantize(&img);

        engine.disable_avg_algorithm();
        let plain = engine.quantize(&img);
        let _ = fs::remove_dir_all(&dir);

        assert_eq!(averaged.get_pixel(1, 0), &Rgb([0x80, 0x80, 0x80]));
        assert_eq!(plain.get_pixel(1, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_reset_palette_empties_it() {
        let dir = scratch_dir("reset");
        let mut engine = grays_engine(&dir);
        assert_eq!(engine.palette.len(), 3);
        engine.reset_palette();
        let _ = fs::remove_dir_all(&dir);
        assert_eq!(engine.palette.len(), 0);
    }

    #[test]
    fn test_convert_with_empty_palette_fails() {
        let mut engine = GoNord::new(1.0, ProgressBar::hidden());
        let img = DynamicImage::ImageRgb8(strip(&[1, 2, 3]));
        let err = engine
            .convert_image(img, &std::env::temp_dir().join("never-written.png"))
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyPalette));
    }

    #[test]
    fn test_missing_color_set_fails() {
        let mut engine = GoNord::new(1.0, ProgressBar::hidden());
        engine.set_palette_lookup_path(&Path::new(PACKAGED_PALETTES_DIR).join("Nord"));
        assert!(matches!(
            engine.add_file_to_palette("Sunset.txt"),
            Err(AppError::Palette(_))
        ));
    }

    #[test]
    fn test_builtin_lookup_path_loads_embedded_sets() {
        let mut engine = GoNord::new(1.0, ProgressBar::hidden());
        engine.set_palette_lookup_path(&Path::new(crate::colors::BUILTIN_ROOT).join("Nord"));
        engine.add_file_to_palette("Aurora.txt").unwrap();
        engine.add_file_to_palette("Frost.txt").unwrap();
        assert_eq!(engine.palette.len(), 9);
    }

    #[test]
    fn test_convert_nord_color_round_trips_through_file() {
        let dir = scratch_dir("convert");
        let input = dir.join("aurora_red.png");
        let output = dir.join("out.png");
        RgbImage::from_pixel(6, 4, Rgb([0xbf, 0x61, 0x6a]))
            .save(&input)
            .unwrap();

        let mut engine = GoNord::new(1.0, ProgressBar::hidden());
        engine.set_palette_lookup_path(&Path::new(PACKAGED_PALETTES_DIR).join("Nord"));
        for set in ["Aurora.txt", "Frost.txt", "PolarNight.txt", "SnowStorm.txt"] {
            engine.add_file_to_palette(set).unwrap();
        }
        engine.enable_gaussian_blur();
        let img = engine.open_image(&input).unwrap();
        engine.convert_image(img, &output).unwrap();

        let result = image::open(&output).unwrap().to_rgb8();
        let _ = fs::remove_dir_all(&dir);

        assert_eq!(result.dimensions(), (6, 4));
        // a blurred solid color stays the same color
        assert_eq!(result.get_pixel(3, 2), &Rgb([0xbf, 0x61, 0x6a]));
    }
}
