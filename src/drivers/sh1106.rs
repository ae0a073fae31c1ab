// Roll Clock — SH1106 OLED Driver (SPI)
//
// Drawing happens in a RAM framebuffer; `present` streams the eight pages to
// the panel. The SH1106 has 132 columns of RAM, so every page starts at
// column 2.

use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};
use esp_idf_hal::spi::{SpiDeviceDriver, SpiDriver};

use rollclock::config::SH1106_COLUMN_OFFSET;
use rollclock::display::Framebuffer;
use rollclock::orientation::DisplayMode;
use rollclock::providers::{DisplayProvider, Font};

const CMD_DISPLAY_OFF: u8 = 0xAE;
const CMD_DISPLAY_ON: u8 = 0xAF;
const CMD_NORMAL: u8 = 0xA6;
const CMD_INVERSE: u8 = 0xA7;
const CMD_PAGE_ADDR: u8 = 0xB0;
const CMD_COLUMN_LOW: u8 = 0x00;
const CMD_COLUMN_HIGH: u8 = 0x10;

const INIT_SEQUENCE: &[u8] = &[
    CMD_DISPLAY_OFF,
    0xD5, 0x80, // Clock divide
    0xA8, 0x3F, // Multiplex 1/64
    0xD3, 0x00, // Display offset
    0x40,       // Start line 0
    0xAD, 0x8B, // DC-DC on
    0xA1,       // Segment remap
    0xC8,       // COM scan descending
    0xDA, 0x12, // COM pins
    0x81, 0xCF, // Contrast
    0xD9, 0x22, // Pre-charge
    0xDB, 0x40, // VCOMH
    0xA4,       // Resume from RAM
    CMD_NORMAL,
    CMD_DISPLAY_ON,
];

pub struct Sh1106 {
    spi: SpiDeviceDriver<'static, SpiDriver<'static>>,
    dc: PinDriver<'static, AnyOutputPin, Output>,
    frame: Framebuffer,
}

impl Sh1106 {
    pub fn new(spi: SpiDeviceDriver<'static, SpiDriver<'static>>, dc: PinDriver<'static, AnyOutputPin, Output>) -> Self {
        Self {
            spi,
            dc,
            frame: Framebuffer::new(),
        }
    }

    pub fn init(&mut self) -> anyhow::Result<()> {
        self.command(INIT_SEQUENCE)?;
        log::info!("SH1106 initialised");
        Ok(())
    }

    fn command(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.dc.set_low()?;
        self.spi.write(bytes)?;
        Ok(())
    }

    fn data(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.dc.set_high()?;
        self.spi.write(bytes)?;
        Ok(())
    }

    pub fn flush(&mut self) -> anyhow::Result<()> {
        for page in 0..8u8 {
            self.command(&[
                CMD_PAGE_ADDR | page,
                CMD_COLUMN_LOW | (SH1106_COLUMN_OFFSET & 0x0F),
                CMD_COLUMN_HIGH | (SH1106_COLUMN_OFFSET >> 4),
            ])?;
            let mut row = [0u8; 128];
            row.copy_from_slice(self.frame.page(page as usize));
            self.data(&row)?;
        }
        Ok(())
    }
}

impl DisplayProvider for Sh1106 {
    fn clear(&mut self) {
        self.frame.clear();
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, font: Font, scale: u32, orientation: DisplayMode) {
        self.frame.draw_text(text, x, y, font, scale, orientation);
    }

    fn draw_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.frame.draw_rect(x0, y0, x1, y1);
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.frame.draw_line(x0, y0, x1, y1);
    }

    fn invert_region(&mut self, x0: i32, x1: i32, y0: i32, y1: i32) {
        self.frame.invert_region(x0, x1, y0, y1);
    }

    /// Inversion is done by the controller, not in RAM.
    fn invert_whole(&mut self, inverted: bool) {
        self.frame.invert_whole(inverted);
        let cmd = if inverted { CMD_INVERSE } else { CMD_NORMAL };
        if let Err(e) = self.command(&[cmd]) {
            log::warn!("SH1106 invert failed: {}", e);
        }
    }

    fn present(&mut self) {
        if let Err(e) = self.flush() {
            log::warn!("SH1106 flush failed: {}", e);
        }
    }
}
