//! Surface resampling.
//!
//! Shrinks the drawing surface to the square model resolution. The default
//! nearest-neighbour sampler picks source pixel `min(floor(dst * in / out), in - 1)`
//! on each axis, without half-pixel centres or corner alignment; the smooth
//! filters delegate to `image::imageops::resize`.

use crate::core::DigitError;
use crate::core::errors::SimpleError;
use crate::processors::types::ResampleFilter;
use image::RgbaImage;

/// Resizes surfaces to a fixed square resolution.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceResize {
    pub target_size: u32,
    pub filter: ResampleFilter,
}

impl SurfaceResize {
    pub fn new(target_size: u32, filter: ResampleFilter) -> Self {
        Self {
            target_size,
            filter,
        }
    }

    /// Resamples `img` to `target_size x target_size`.
    ///
    /// # Errors
    ///
    /// Returns a resize error if either the source or the target is empty.
    pub fn apply(&self, img: &RgbaImage) -> Result<RgbaImage, DigitError> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 || self.target_size == 0 {
            return Err(DigitError::resize_error(
                "cannot resample an empty surface",
                SimpleError::new(format!(
                    "{}x{} -> {}x{}",
                    width, height, self.target_size, self.target_size
                )),
            ));
        }

        match self.filter.image_filter() {
            Some(filter) => Ok(image::imageops::resize(
                img,
                self.target_size,
                self.target_size,
                filter,
            )),
            None => Ok(resize_nearest(img, self.target_size, self.target_size)),
        }
    }
}

/// Source index sampled for destination index `dst` when scaling `src_len` to `dst_len`.
///
/// Computed in integer arithmetic so the result is exact for every size.
pub fn nearest_source_index(dst: u32, src_len: u32, dst_len: u32) -> u32 {
    let index = (dst as u64 * src_len as u64) / dst_len as u64;
    (index as u32).min(src_len - 1)
}

/// Nearest-neighbour resize to `out_width x out_height`.
pub fn resize_nearest(img: &RgbaImage, out_width: u32, out_height: u32) -> RgbaImage {
    let (width, height) = img.dimensions();
    let columns: Vec<u32> = (0..out_width)
        .map(|x| nearest_source_index(x, width, out_width))
        .collect();
    RgbaImage::from_fn(out_width, out_height, |x, y| {
        let sy = nearest_source_index(y, height, out_height);
        *img.get_pixel(columns[x as usize], sy)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_nearest_source_index_downscale() {
        // 300 -> 28 samples every 10.714 pixels.
        assert_eq!(nearest_source_index(0, 300, 28), 0);
        assert_eq!(nearest_source_index(1, 300, 28), 10);
        assert_eq!(nearest_source_index(14, 300, 28), 150);
        assert_eq!(nearest_source_index(27, 300, 28), 289);
        // 240 -> 28 samples every 8.571 pixels.
        assert_eq!(nearest_source_index(27, 240, 28), 231);
    }

    #[test]
    fn test_nearest_source_index_upscale_is_clamped() {
        assert_eq!(nearest_source_index(0, 2, 4), 0);
        assert_eq!(nearest_source_index(1, 2, 4), 0);
        assert_eq!(nearest_source_index(2, 2, 4), 1);
        assert_eq!(nearest_source_index(3, 2, 4), 1);
    }

    #[test]
    fn test_resize_nearest_picks_exact_pixels() {
        let img = RgbaImage::from_fn(4, 4, |x, y| Rgba([(x * 10) as u8, (y * 10) as u8, 0, 255]));
        let out = resize_nearest(&img, 2, 2);
        assert_eq!(*out.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(*out.get_pixel(1, 0), Rgba([20, 0, 0, 255]));
        assert_eq!(*out.get_pixel(0, 1), Rgba([0, 20, 0, 255]));
        assert_eq!(*out.get_pixel(1, 1), Rgba([20, 20, 0, 255]));
    }

    #[test]
    fn test_apply_output_size_independent_of_input() {
        let resize = SurfaceResize::new(28, ResampleFilter::Nearest);
        for (w, h) in [(300, 240), (28, 28), (7, 90), (1, 1)] {
            let out = resize.apply(&RgbaImage::new(w, h)).unwrap();
            assert_eq!(out.dimensions(), (28, 28));
        }
        let smooth = SurfaceResize::new(28, ResampleFilter::Triangle);
        assert_eq!(smooth.apply(&RgbaImage::new(300, 240)).unwrap().dimensions(), (28, 28));
    }

    #[test]
    fn test_apply_rejects_empty_surface() {
        let resize = SurfaceResize::new(28, ResampleFilter::Nearest);
        let err = resize.apply(&RgbaImage::new(0, 10)).unwrap_err();
        assert!(matches!(
            err,
            DigitError::Processing {
                kind: crate::core::ProcessingStage::Resize,
                ..
            }
        ));
    }
}
