//! Cover image rendering.
//!
//! The cover is the selected style's preview image drawn aspect-fit onto a
//! white canvas and encoded as JPEG.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use thiserror::Error;

use crate::config::CoverSettings;

#[derive(Error, Debug)]
pub enum CoverError {
    #[error("Cannot decode preview image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Cannot encode cover as JPEG: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Cover size {width}x{height} is empty")]
    EmptyCanvas { width: u32, height: u32 },
}

/// Cover output parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverOptions {
    /// JPEG quality, clamped to 1-100.
    pub jpeg_quality: u8,
    /// Canvas size; the preview's own size when `None`.
    pub size: Option<(u32, u32)>,
}

impl Default for CoverOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: 80,
            size: None,
        }
    }
}

impl From<&CoverSettings> for CoverOptions {
    fn from(settings: &CoverSettings) -> Self {
        let size = match (settings.width, settings.height) {
            (Some(width), Some(height)) => Some((width, height)),
            (None, None) => None,
            _ => {
                tracing::warn!(
                    "Cover width and height must be set together, using preview size"
                );
                None
            }
        };
        Self {
            jpeg_quality: settings.jpeg_quality,
            size,
        }
    }
}

/// Render a JPEG cover from encoded preview image bytes.
pub fn render_cover(preview: &[u8], options: CoverOptions) -> Result<Vec<u8>, CoverError> {
    let image = image::load_from_memory(preview).map_err(CoverError::Decode)?;
    let (width, height) = options.size.unwrap_or((image.width(), image.height()));
    if width == 0 || height == 0 {
        return Err(CoverError::EmptyCanvas { width, height });
    }

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    let fitted = if (image.width(), image.height()) == (width, height) {
        image.to_rgba8()
    } else {
        image.resize(width, height, FilterType::Triangle).to_rgba8()
    };
    let x = width.saturating_sub(fitted.width()) / 2;
    let y = height.saturating_sub(fitted.height()) / 2;
    imageops::overlay(&mut canvas, &fitted, i64::from(x), i64::from(y));

    let rgb = DynamicImage::ImageRgba8(canvas).to_rgb8();
    let mut out = Cursor::new(Vec::new());
    let mut encoder = JpegEncoder::new_with_quality(&mut out, options.jpeg_quality.clamp(1, 100));
    encoder.encode_image(&rgb).map_err(CoverError::Encode)?;

    Ok(out.into_inner())
}

#[cfg(test)]
pub(crate) fn png_fixture(width: u32, height: u32, pixel: [u8; 4]) -> Vec<u8> {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(pixel)));
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png fixture");
    out.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(jpeg: &[u8]) -> image::RgbImage {
        image::load_from_memory(jpeg).unwrap().to_rgb8()
    }

    #[test]
    fn renders_jpeg_at_preview_size() {
        let preview = png_fixture(8, 4, [200, 30, 30, 255]);
        let jpeg = render_cover(&preview, CoverOptions::default()).unwrap();

        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        let cover = decode(&jpeg);
        assert_eq!(cover.dimensions(), (8, 4));
    }

    #[test]
    fn transparent_areas_become_white() {
        let preview = png_fixture(16, 16, [0, 0, 0, 0]);
        let cover = decode(&render_cover(&preview, CoverOptions::default()).unwrap());

        let pixel = cover.get_pixel(8, 8);
        assert!(
            pixel.0.iter().all(|c| *c > 240),
            "expected white, got {:?}",
            pixel
        );
    }

    #[test]
    fn aspect_fit_letterboxes_on_white() {
        // Wide black preview on a square canvas: bands above and below stay white.
        let preview = png_fixture(40, 10, [0, 0, 0, 255]);
        let options = CoverOptions {
            jpeg_quality: 90,
            size: Some((40, 40)),
        };
        let cover = decode(&render_cover(&preview, options).unwrap());

        assert_eq!(cover.dimensions(), (40, 40));
        assert!(cover.get_pixel(20, 2).0.iter().all(|c| *c > 200));
        assert!(cover.get_pixel(20, 20).0.iter().all(|c| *c < 60));
    }

    #[test]
    fn garbage_preview_is_decode_error() {
        let err = render_cover(b"not an image", CoverOptions::default()).unwrap_err();
        assert!(matches!(err, CoverError::Decode(_)));
    }

    #[test]
    fn zero_canvas_is_rejected() {
        let preview = png_fixture(2, 2, [0, 0, 0, 255]);
        let options = CoverOptions {
            jpeg_quality: 80,
            size: Some((0, 10)),
        };
        assert!(matches!(
            render_cover(&preview, options),
            Err(CoverError::EmptyCanvas { .. })
        ));
    }

    #[test]
    fn options_from_settings() {
        let mut settings = CoverSettings::default();
        assert_eq!(CoverOptions::from(&settings), CoverOptions::default());

        settings.width = Some(320);
        assert_eq!(CoverOptions::from(&settings).size, None);

        settings.height = Some(180);
        assert_eq!(CoverOptions::from(&settings).size, Some((320, 180)));
    }
}
