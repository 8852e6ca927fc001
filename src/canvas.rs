//! CPU pixel canvas.
//!
//! Owns the ARGB8888 color buffer and the primitive drawing operations:
//! Bresenham lines, filled rects, and an optional alignment grid. The buffer
//! is row-major so it can be handed to a streaming texture as raw bytes.

use std::path::Path;

use crate::colors;
use crate::math::Vec2;
use crate::pipeline::LineSink;

/// Side length of the square drawn on each segment endpoint.
const MARKER_SIZE: i32 = 4;

pub struct Canvas {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let size = (width * height) as usize;
        self.color_buffer = vec![colors::BACKGROUND; size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let index = (y as u32 * self.width + x as u32) as usize;
            self.color_buffer[index] = color;
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.color_buffer[(y * self.width + x) as usize]
    }

    pub fn draw_grid(&mut self, spacing: i32, color: u32) {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if x % spacing == 0 || y % spacing == 0 {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    pub fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: u32) {
        for dy in 0..height {
            for dx in 0..width {
                self.set_pixel(x + dx, y + dy, color);
            }
        }
    }

    /// Draws a line between two points using Bresenham's line algorithm.
    ///
    /// Integer error tracking decides when to step the minor axis: each
    /// iteration steps the major axis, and steps the minor axis once the
    /// accumulated error crosses the threshold.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();

        let x_step = if x0 < x1 { 1 } else { -1 };
        let y_step = if y0 < y1 { 1 } else { -1 };

        let mut err = dx - dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            self.set_pixel(x, y, color);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += x_step;
            }
            if e2 < dx {
                err += dx;
                y += y_step;
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    /// Writes the buffer to a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        // Convert ARGB u32 to RGBA bytes
        let img = image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let argb = self.color_buffer[(y * self.width + x) as usize];
            image::Rgba([
                (argb >> 16) as u8,
                (argb >> 8) as u8,
                argb as u8,
                (argb >> 24) as u8,
            ])
        });
        img.save(path)
    }
}

impl LineSink for Canvas {
    /// Thin edge line plus a small square on each endpoint.
    fn draw_segment(&mut self, from: Vec2, to: Vec2) {
        let (x0, y0) = (from.x.round() as i32, from.y.round() as i32);
        let (x1, y1) = (to.x.round() as i32, to.y.round() as i32);

        self.draw_line(x0, y0, x1, y1, colors::EDGE);
        for (x, y) in [(x0, y0), (x1, y1)] {
            self.draw_rect(
                x - MARKER_SIZE / 2,
                y - MARKER_SIZE / 2,
                MARKER_SIZE,
                MARKER_SIZE,
                colors::MARKER,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_pixels_are_ignored() {
        let mut canvas = Canvas::new(4, 4);
        canvas.set_pixel(-1, 0, colors::EDGE);
        canvas.set_pixel(0, -1, colors::EDGE);
        canvas.set_pixel(4, 0, colors::EDGE);
        canvas.set_pixel(0, 4, colors::EDGE);

        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(canvas.pixel(x, y), colors::BACKGROUND);
            }
        }
    }

    #[test]
    fn clear_floods_the_buffer() {
        let mut canvas = Canvas::new(3, 3);
        canvas.set_pixel(1, 1, colors::EDGE);
        canvas.clear(colors::BACKGROUND);
        assert_eq!(canvas.pixel(1, 1), colors::BACKGROUND);
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut canvas = Canvas::new(8, 8);
        canvas.draw_line(1, 1, 6, 4, colors::EDGE);
        assert_eq!(canvas.pixel(1, 1), colors::EDGE);
        assert_eq!(canvas.pixel(6, 4), colors::EDGE);
    }

    #[test]
    fn grid_lines_fall_on_the_spacing() {
        let mut canvas = Canvas::new(16, 16);
        canvas.draw_grid(10, colors::GRID);
        assert_eq!(canvas.pixel(10, 5), colors::GRID);
        assert_eq!(canvas.pixel(5, 10), colors::GRID);
        assert_eq!(canvas.pixel(5, 5), colors::BACKGROUND);
    }

    #[test]
    fn segment_sink_marks_the_endpoints() {
        let mut canvas = Canvas::new(32, 32);
        canvas.draw_segment(Vec2::new(10.2, 10.4), Vec2::new(20.0, 10.0));

        assert_eq!(canvas.pixel(15, 10), colors::EDGE);
        assert_eq!(canvas.pixel(10, 10), colors::MARKER);
        assert_eq!(canvas.pixel(20, 10), colors::MARKER);
        assert_eq!(canvas.pixel(9, 9), colors::MARKER);
    }
}
