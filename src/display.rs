// Roll Clock — Monochrome Framebuffer
//
// 128x64, one bit per pixel, laid out in 8-pixel-tall pages the way SH1106
// and SSD1306 controllers expect: byte `page * 128 + x`, bit `y % 8`.
// Text goes through embedded-graphics and a small adapter that scales glyphs
// and rotates them into whichever face of the clock is currently up.

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_5X8, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::config::{DISPLAY_BUFFER_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::orientation::DisplayMode;
use crate::providers::{DisplayProvider, Font};

const WIDTH: i32 = SCREEN_WIDTH as i32;
const HEIGHT: i32 = SCREEN_HEIGHT as i32;

impl Font {
    fn mono(self) -> &'static MonoFont<'static> {
        match self {
            Self::Small => &FONT_5X8,
            Self::Medium => &FONT_6X10,
            Self::Large => &FONT_10X20,
        }
    }

    /// Advance per character at scale 1, in pixels.
    pub fn char_width(self) -> i32 {
        let font = self.mono();
        (font.character_size.width + font.character_spacing) as i32
    }

    pub fn char_height(self) -> i32 {
        self.mono().character_size.height as i32
    }
}

pub struct Framebuffer {
    pages: [u8; DISPLAY_BUFFER_SIZE],
    inverted: bool,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    pub fn new() -> Self {
        Self {
            pages: [0; DISPLAY_BUFFER_SIZE],
            inverted: false,
        }
    }

    /// Raw page data, ready to stream to the controller.
    pub fn pages(&self) -> &[u8; DISPLAY_BUFFER_SIZE] {
        &self.pages
    }

    /// One 128-byte page row.
    pub fn page(&self, page: usize) -> &[u8] {
        let start = page * SCREEN_WIDTH as usize;
        &self.pages[start..start + SCREEN_WIDTH as usize]
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    fn index(x: i32, y: i32) -> Option<(usize, u8)> {
        if !(0..WIDTH).contains(&x) || !(0..HEIGHT).contains(&y) {
            return None;
        }
        let byte = (y / 8) as usize * SCREEN_WIDTH as usize + x as usize;
        Some((byte, 1 << (y % 8)))
    }

    pub fn pixel(&self, x: i32, y: i32) -> bool {
        Self::index(x, y).map_or(false, |(byte, bit)| self.pages[byte] & bit != 0)
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((byte, bit)) = Self::index(x, y) {
            if on {
                self.pages[byte] |= bit;
            } else {
                self.pages[byte] &= !bit;
            }
        }
    }

    fn toggle_pixel(&mut self, x: i32, y: i32) {
        if let Some((byte, bit)) = Self::index(x, y) {
            self.pages[byte] ^= bit;
        }
    }

    pub fn lit_pixels(&self) -> u32 {
        self.pages.iter().map(|b| b.count_ones()).sum()
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            self.set_pixel(p.x, p.y, color.is_on());
        }
        Ok(())
    }
}

/// Draws in the logical coordinates of one clock face: scales each source
/// pixel to a `scale`×`scale` block at `origin` and rotates the result onto
/// the panel.
struct Oriented<'a> {
    fb: &'a mut Framebuffer,
    mode: DisplayMode,
    origin: Point,
    scale: i32,
}

impl Oriented<'_> {
    fn to_panel(&self, x: i32, y: i32) -> (i32, i32) {
        match self.mode {
            DisplayMode::Normal => (x, y),
            DisplayMode::UpsideDown => (WIDTH - 1 - x, HEIGHT - 1 - y),
            DisplayMode::RotatedCcw90 => (y, HEIGHT - 1 - x),
            DisplayMode::RotatedCw90 => (WIDTH - 1 - y, x),
        }
    }
}

impl OriginDimensions for Oriented<'_> {
    fn size(&self) -> Size {
        match self.mode {
            DisplayMode::Normal | DisplayMode::UpsideDown => Size::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            DisplayMode::RotatedCcw90 | DisplayMode::RotatedCw90 => Size::new(SCREEN_HEIGHT, SCREEN_WIDTH),
        }
    }
}

impl DrawTarget for Oriented<'_> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            let lx = self.origin.x + p.x * self.scale;
            let ly = self.origin.y + p.y * self.scale;
            for dy in 0..self.scale {
                for dx in 0..self.scale {
                    let (px, py) = self.to_panel(lx + dx, ly + dy);
                    self.fb.set_pixel(px, py, color.is_on());
                }
            }
        }
        Ok(())
    }
}

impl DisplayProvider for Framebuffer {
    fn clear(&mut self) {
        self.pages.fill(0);
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, font: Font, scale: u32, orientation: DisplayMode) {
        let style = MonoTextStyle::new(font.mono(), BinaryColor::On);
        let mut target = Oriented {
            fb: self,
            mode: orientation,
            origin: Point::new(x, y),
            scale: scale.max(1) as i32,
        };
        let _ = Text::with_baseline(text, Point::zero(), style, Baseline::Top).draw(&mut target);
    }

    fn draw_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let style = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
        let _ = Rectangle::with_corners(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(style)
            .draw(self);
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let style = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
        let _ = Line::new(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(style)
            .draw(self);
    }

    fn invert_region(&mut self, x0: i32, x1: i32, y0: i32, y1: i32) {
        for y in y0.max(0)..y1.min(HEIGHT) {
            for x in x0.max(0)..x1.min(WIDTH) {
                self.toggle_pixel(x, y);
            }
        }
    }

    fn invert_whole(&mut self, inverted: bool) {
        self.inverted = inverted;
    }

    fn present(&mut self) {}
}
