//! Rounded rectangles for logo backing plates and clipped QR blocks.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

/// An axis-aligned rectangle with uniformly rounded corners, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub radius: u32,
}

impl RoundedRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32, radius: u32) -> Self {
        let radius = radius.min(width / 2).min(height / 2);
        Self {
            x,
            y,
            width,
            height,
            radius,
        }
    }

    /// Whether the center of pixel `(px, py)` lies inside the shape.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        let cx = f64::from(px) + 0.5;
        let cy = f64::from(py) + 0.5;
        let (left, top) = (f64::from(self.x), f64::from(self.y));
        let right = left + f64::from(self.width);
        let bottom = top + f64::from(self.height);
        if cx < left || cx >= right || cy < top || cy >= bottom {
            return false;
        }

        let r = f64::from(self.radius);
        let corner_x = if cx < left + r {
            left + r
        } else if cx > right - r {
            right - r
        } else {
            return true;
        };
        let corner_y = if cy < top + r {
            top + r
        } else if cy > bottom - r {
            bottom - r
        } else {
            return true;
        };
        let (dx, dy) = (cx - corner_x, cy - corner_y);
        dx * dx + dy * dy <= r * r
    }

    /// Fill the shape: two overlapping bars plus four corner discs.
    pub fn fill(&self, img: &mut RgbaImage, color: Rgba<u8>) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let r = self.radius;
        if r == 0 {
            draw_filled_rect_mut(
                img,
                Rect::at(self.x, self.y).of_size(self.width, self.height),
                color,
            );
            return;
        }

        let ri = r as i32;
        if self.width > 2 * r {
            draw_filled_rect_mut(
                img,
                Rect::at(self.x + ri, self.y).of_size(self.width - 2 * r, self.height),
                color,
            );
        }
        if self.height > 2 * r {
            draw_filled_rect_mut(
                img,
                Rect::at(self.x, self.y + ri).of_size(self.width, self.height - 2 * r),
                color,
            );
        }

        let right = self.x + self.width as i32 - 1 - ri;
        let bottom = self.y + self.height as i32 - 1 - ri;
        for center in [
            (self.x + ri, self.y + ri),
            (right, self.y + ri),
            (self.x + ri, bottom),
            (right, bottom),
        ] {
            draw_filled_circle_mut(img, center, ri, color);
        }
    }
}
