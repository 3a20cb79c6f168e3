//! The drawing surface.
//!
//! A [`Surface`] is a fixed-size RGBA pixel buffer with a solid background fill.
//! Strokes are rasterized into it in place and the normalizer reads it back.

use crate::core::DigitResult;
use crate::core::config::{StrokeStyle, SurfaceConfig};
use crate::domain::SurfacePoint;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_polygon_mut};
use imageproc::point::Point;
use std::path::Path;

/// Fixed-size RGBA drawing buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pixels: RgbaImage,
    background: Rgba<u8>,
}

impl Surface {
    /// Creates a surface of the given size, filled with `background`.
    pub fn new(width: u32, height: u32, background: [u8; 3]) -> Self {
        let background = Rgba([background[0], background[1], background[2], 255]);
        Self {
            pixels: RgbaImage::from_pixel(width, height, background),
            background,
        }
    }

    pub fn from_config(config: &SurfaceConfig) -> Self {
        Self::new(config.width, config.height, config.background)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Returns the current pixel buffer.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn background(&self) -> Rgba<u8> {
        self.background
    }

    /// Resets every pixel to the background fill.
    pub fn clear(&mut self) {
        let background = self.background;
        self.pixels
            .pixels_mut()
            .for_each(|pixel| *pixel = background);
    }

    /// Returns true if no pixel differs from the background fill.
    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|pixel| *pixel == self.background)
    }

    /// Paints a straight segment from `from` to `to` with round caps.
    ///
    /// The body is a filled quadrilateral of the stroke width and each end gets a
    /// disc of half that width. The segment is first clipped to a margin around
    /// the surface, so far-off endpoints cost nothing; non-finite endpoints draw
    /// nothing.
    pub fn draw_segment(&mut self, from: SurfacePoint, to: SurfacePoint, style: &StrokeStyle) {
        let color = Rgba([style.color[0], style.color[1], style.color[2], 255]);
        let half = style.width / 2.0;
        let radius = half.round().max(0.0) as i32;

        let margin = half.max(0.0) + 2.0;
        let Some((from, to)) = self.clip_to_margin(from, to, margin) else {
            return;
        };

        let length = from.distance(to);
        if length >= 1.0 {
            let nx = -(to.y - from.y) / length * half;
            let ny = (to.x - from.x) / length * half;
            let corner = |p: SurfacePoint, sign: f32| {
                Point::new(
                    (p.x + sign * nx).round() as i32,
                    (p.y + sign * ny).round() as i32,
                )
            };
            let body = [
                corner(from, 1.0),
                corner(to, 1.0),
                corner(to, -1.0),
                corner(from, -1.0),
            ];
            if body[0] != body[3] {
                draw_polygon_mut(&mut self.pixels, &body, color);
            }
        }

        for cap in [from, to] {
            draw_filled_circle_mut(
                &mut self.pixels,
                (cap.x.round() as i32, cap.y.round() as i32),
                radius,
                color,
            );
        }
    }

    /// Clips a segment to the surface grown by `margin` on every side
    /// (Liang-Barsky). Returns `None` if nothing of it remains or an endpoint
    /// is not finite.
    ///
    /// Clipped ends lie at least `margin` outside the surface, beyond the
    /// reach of a cap drawn there.
    fn clip_to_margin(
        &self,
        from: SurfacePoint,
        to: SurfacePoint,
        margin: f32,
    ) -> Option<(SurfacePoint, SurfacePoint)> {
        if ![from.x, from.y, to.x, to.y].iter().all(|v| v.is_finite()) {
            return None;
        }
        let (min_x, min_y) = (-margin, -margin);
        let max_x = self.width() as f32 + margin;
        let max_y = self.height() as f32 + margin;

        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let (mut t0, mut t1) = (0.0f32, 1.0f32);
        for (p, q) in [
            (-dx, from.x - min_x),
            (dx, max_x - from.x),
            (-dy, from.y - min_y),
            (dy, max_y - from.y),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
            } else {
                let t = q / p;
                if p < 0.0 {
                    t0 = t0.max(t);
                } else {
                    t1 = t1.min(t);
                }
            }
        }
        if t0 > t1 {
            return None;
        }
        let at = |t: f32| SurfacePoint::new(from.x + t * dx, from.y + t * dy);
        Some((at(t0), at(t1)))
    }

    /// Writes the surface to a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> DigitResult<()> {
        self.pixels.save(path.as_ref())?;
        Ok(())
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::from_config(&SurfaceConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke_pixel(style: &StrokeStyle) -> Rgba<u8> {
        Rgba([style.color[0], style.color[1], style.color[2], 255])
    }

    #[test]
    fn test_new_surface_is_background_filled() {
        let surface = Surface::default();
        assert_eq!(surface.width(), 300);
        assert_eq!(surface.height(), 240);
        assert!(surface.is_blank());
        assert_eq!(*surface.pixels().get_pixel(0, 0), Rgba([50, 50, 50, 255]));
    }

    #[test]
    fn test_segment_covers_its_center_line() {
        let mut surface = Surface::default();
        let style = StrokeStyle::default();
        let from = SurfacePoint::new(40.0, 60.0);
        let to = SurfacePoint::new(200.0, 150.0);
        surface.draw_segment(from, to, &style);

        for step in 0..=100 {
            let t = step as f32 / 100.0;
            let x = from.x + (to.x - from.x) * t;
            let y = from.y + (to.y - from.y) * t;
            assert_eq!(
                *surface.pixels().get_pixel(x as u32, y as u32),
                stroke_pixel(&style),
                "gap at t={t}"
            );
        }
    }

    #[test]
    fn test_segment_has_round_caps_and_width() {
        let mut surface = Surface::default();
        let style = StrokeStyle::default();
        surface.draw_segment(
            SurfacePoint::new(100.0, 100.0),
            SurfacePoint::new(150.0, 100.0),
            &style,
        );
        // Cap extends past the end point along the segment direction.
        assert_eq!(*surface.pixels().get_pixel(94, 100), stroke_pixel(&style));
        assert_eq!(*surface.pixels().get_pixel(156, 100), stroke_pixel(&style));
        // Body is about 16 units wide.
        assert_eq!(*surface.pixels().get_pixel(125, 94), stroke_pixel(&style));
        assert_eq!(*surface.pixels().get_pixel(125, 106), stroke_pixel(&style));
        assert_eq!(*surface.pixels().get_pixel(125, 112), surface.background());
        assert_eq!(*surface.pixels().get_pixel(125, 88), surface.background());
    }

    #[test]
    fn test_segment_off_surface_is_clipped() {
        let mut surface = Surface::new(20, 20, [0, 0, 0]);
        let style = StrokeStyle::default();
        surface.draw_segment(
            SurfacePoint::new(-50.0, 10.0),
            SurfacePoint::new(70.0, 10.0),
            &style,
        );
        assert_eq!(*surface.pixels().get_pixel(10, 10), stroke_pixel(&style));
    }

    #[test]
    fn test_segment_to_far_point_is_clipped() {
        let mut surface = Surface::default();
        let style = StrokeStyle::default();
        surface.draw_segment(
            SurfacePoint::new(100.0, 100.0),
            SurfacePoint::new(1e10, 100.0),
            &style,
        );
        assert_eq!(*surface.pixels().get_pixel(100, 100), stroke_pixel(&style));
        assert_eq!(*surface.pixels().get_pixel(299, 100), stroke_pixel(&style));
        assert_eq!(*surface.pixels().get_pixel(200, 120), surface.background());

        let mut diagonal = Surface::default();
        diagonal.draw_segment(
            SurfacePoint::new(-1e6, -1e6),
            SurfacePoint::new(1e6, 1e6),
            &style,
        );
        assert_eq!(*diagonal.pixels().get_pixel(120, 120), stroke_pixel(&style));
    }

    #[test]
    fn test_segment_with_non_finite_end_draws_nothing() {
        let mut surface = Surface::default();
        let style = StrokeStyle::default();
        for to in [
            SurfacePoint::new(f32::INFINITY, 100.0),
            SurfacePoint::new(100.0, f32::NEG_INFINITY),
            SurfacePoint::new(f32::NAN, 100.0),
        ] {
            surface.draw_segment(SurfacePoint::new(100.0, 100.0), to, &style);
        }
        assert!(surface.is_blank());
    }

    #[test]
    fn test_segment_entirely_outside_draws_nothing() {
        let mut surface = Surface::default();
        surface.draw_segment(
            SurfacePoint::new(-500.0, -40.0),
            SurfacePoint::new(900.0, -40.0),
            &StrokeStyle::default(),
        );
        assert!(surface.is_blank());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut surface = Surface::default();
        surface.draw_segment(
            SurfacePoint::new(10.0, 10.0),
            SurfacePoint::new(90.0, 90.0),
            &StrokeStyle::default(),
        );
        assert!(!surface.is_blank());

        surface.clear();
        let once = surface.clone();
        surface.clear();
        assert_eq!(surface, once);
        assert_eq!(surface, Surface::default());
    }

    #[test]
    fn test_save_png_round_trips_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("surface.png");
        let mut surface = Surface::new(32, 24, [50, 50, 50]);
        surface.draw_segment(
            SurfacePoint::new(4.0, 4.0),
            SurfacePoint::new(28.0, 20.0),
            &StrokeStyle::default(),
        );
        surface.save_png(&path).unwrap();
        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(&decoded, surface.pixels());
    }
}
