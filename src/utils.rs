use crate::types::PixelsArea;

use image::{Rgb, RgbImage};
use palette::{IntoColor, Lab, Srgb};

/// Summed-area table, one row and column larger than the image.
pub type IntegralImage = Vec<Vec<[u64; 3]>>;

pub fn rgb_to_lab(pixel: Rgb<u8>) -> Lab {
    let rgb = Srgb::new(
        pixel[0] as f32 / 255.0,
        pixel[1] as f32 / 255.0,
        pixel[2] as f32 / 255.0,
    );
    rgb.into_color()
}

pub fn compute_integral_image(image: &RgbImage) -> IntegralImage {
    let (width, height) = image.dimensions();
    let mut integral = vec![vec![[0u64; 3]; width as usize + 1]; height as usize + 1];

    for y in 1..=height as usize {
        for x in 1..=width as usize {
            let pixel = image.get_pixel(x as u32 - 1, y as u32 - 1);
            for c in 0..3 {
                integral[y][x][c] = integral[y - 1][x][c] + integral[y][x - 1][c]
                    - integral[y - 1][x - 1][c]
                    + pixel[c] as u64;
            }
        }
    }

    integral
}

/// Mean color of the `area` box centered on (x, y), clipped to the image.
pub fn box_average(
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    area: PixelsArea,
    integral_image: &[Vec<[u64; 3]>],
) -> Rgb<u8> {
    let x1 = x.saturating_sub((area.width - 1) / 2) as usize;
    let y1 = y.saturating_sub((area.height - 1) / 2) as usize;
    let x2 = (x + area.width / 2).min(width - 1) as usize + 1;
    let y2 = (y + area.height / 2).min(height - 1) as usize + 1;

    let count = ((x2 - x1) * (y2 - y1)) as u64;

    let mut mean = [0u8; 3];
    for (c, channel) in mean.iter_mut().enumerate() {
        let sum = integral_image[y2][x2][c] + integral_image[y1][x1][c]
            - integral_image[y1][x2][c]
            - integral_image[y2][x1][c];
        *channel = ((sum + count / 2) / count) as u8;
    }
    Rgb(mean)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(values: &[u8]) -> RgbImage {
        let mut img = RgbImage::new(values.len() as u32, 1);
        for (x, v) in values.iter().enumerate() {
            img.put_pixel(x as u32, 0, Rgb([*v, *v, *v]));
        }
        img
    }

    #[test]
    fn test_integral_image_totals() {
        let img = strip(&[10, 20, 30]);
        let integral = compute_integral_image(&img);
        assert_eq!(integral.len(), 2);
        assert_eq!(integral[1][3], [60, 60, 60]);
        assert_eq!(integral[0][3], [0, 0, 0]);
    }

    #[test]
    fn test_box_average_is_clipped_at_borders() {
        let img = strip(&[0, 90, 0]);
        let integral = compute_integral_image(&img);
        let area = PixelsArea { width: 3, height: 1 };

        assert_eq!(box_average(1, 0, 3, 1, area, &integral), Rgb([30, 30, 30]));
        assert_eq!(box_average(0, 0, 3, 1, area, &integral), Rgb([45, 45, 45]));
    }

    #[test]
    fn test_single_pixel_box_is_identity() {
        let img = strip(&[7, 200, 13]);
        let integral = compute_integral_image(&img);
        let area = PixelsArea { width: 1, height: 1 };
        for x in 0..3 {
            assert_eq!(box_average(x, 0, 3, 1, area, &integral), *img.get_pixel(x, 0));
        }
    }

    #[test]
    fn test_rgb_to_lab_extremes() {
        let black = rgb_to_lab(Rgb([0, 0, 0]));
        let white = rgb_to_lab(Rgb([255, 255, 255]));
        assert!(black.l.abs() < 0.01);
        assert!((white.l - 100.0).abs() < 0.1);
    }
}
