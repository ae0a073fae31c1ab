// Roll Clock — MCP7940N RTC Driver
//
// The chip keeps everything in BCD with control bits packed into the same
// registers. BCD stays in this file; the rest of the firmware sees decimal
// `Time` / `Date` values.

use rollclock::calendar::{AlarmTime, Date, Time, Weekday};
use rollclock::config::{I2C_ADDR_MCP7940N, I2C_TIMEOUT_TICKS};
use rollclock::providers::RtcProvider;

use super::{with_bus, SharedBus};

// Timekeeping registers
const REG_RTCSEC: u8 = 0x00; // bit 7: ST (oscillator start)
const REG_RTCWKDAY: u8 = 0x03; // bit 3: VBATEN
const REG_RTCDATE: u8 = 0x04; // date, month, year follow
const REG_CONTROL: u8 = 0x07;
const REG_ALM0SEC: u8 = 0x0A; // minute, hour follow

const SEC_ST: u8 = 0x80;
const WKDAY_VBATEN: u8 = 0x08;
const CONTROL_ALM0EN: u8 = 0x10;

fn bcd_to_dec(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}

fn dec_to_bcd(dec: u8) -> u8 {
    ((dec / 10) << 4) | (dec % 10)
}

pub struct Mcp7940n {
    bus: SharedBus,
    snapshot: ClockRegisters,
}

/// Last good values, handed back when the bus fails.
#[derive(Default)]
struct ClockRegisters {
    time: Time,
    date: Date,
    weekday: Weekday,
    alarm: AlarmTime,
}

impl Mcp7940n {
    pub fn new(bus: SharedBus) -> Self {
        Self {
            bus,
            snapshot: ClockRegisters::default(),
        }
    }

    /// Start the oscillator (if stopped) and enable battery backup.
    pub fn init(&self) -> anyhow::Result<()> {
        let sec = self.read_register(REG_RTCSEC)?;
        let wkday = self.read_register(REG_RTCWKDAY)?;
        if sec & SEC_ST == 0 {
            self.write_registers(REG_RTCSEC, &[sec | SEC_ST])?;
            log::info!("MCP7940N oscillator started");
        }
        self.write_registers(REG_RTCWKDAY, &[wkday | WKDAY_VBATEN])?;
        Ok(())
    }

    fn read_register(&self, reg: u8) -> anyhow::Result<u8> {
        let mut buf = [0u8; 1];
        self.read_registers(reg, &mut buf)?;
        Ok(buf[0])
    }

    fn read_registers(&self, start: u8, buf: &mut [u8]) -> anyhow::Result<()> {
        with_bus(self.bus, |bus| {
            bus.write_read(I2C_ADDR_MCP7940N, &[start], buf, I2C_TIMEOUT_TICKS)
        })
    }

    fn write_registers(&self, start: u8, values: &[u8]) -> anyhow::Result<()> {
        let mut frame = [0u8; 8];
        frame[0] = start;
        frame[1..=values.len()].copy_from_slice(values);
        with_bus(self.bus, |bus| {
            bus.write(I2C_ADDR_MCP7940N, &frame[..=values.len()], I2C_TIMEOUT_TICKS)
        })
    }

    /// Seconds, minutes, hours starting at `start` (time or alarm 0 block).
    fn read_hms(&self, start: u8) -> anyhow::Result<Time> {
        let mut raw = [0u8; 3];
        self.read_registers(start, &mut raw)?;
        Time::new(
            bcd_to_dec(raw[2] & 0x3F),
            bcd_to_dec(raw[1] & 0x7F),
            bcd_to_dec(raw[0] & 0x7F),
        )
        .ok_or_else(|| anyhow::anyhow!("Invalid time registers {:02X?}", raw))
    }

    fn read_date_registers(&self) -> anyhow::Result<Date> {
        let mut raw = [0u8; 3];
        self.read_registers(REG_RTCDATE, &mut raw)?;
        Date::new(
            bcd_to_dec(raw[0] & 0x3F),
            bcd_to_dec(raw[1] & 0x1F),
            bcd_to_dec(raw[2]),
        )
        .ok_or_else(|| anyhow::anyhow!("Invalid date registers {:02X?}", raw))
    }

    fn read_weekday_register(&self) -> anyhow::Result<Weekday> {
        let raw = self.read_register(REG_RTCWKDAY)?;
        Weekday::new(raw & 0x07).ok_or_else(|| anyhow::anyhow!("Invalid weekday register {:02X}", raw))
    }
}

/// Log a failed transfer and keep going.
fn report(what: &str, result: anyhow::Result<()>) {
    if let Err(e) = result {
        log::warn!("MCP7940N {} failed: {}", what, e);
    }
}

impl RtcProvider for Mcp7940n {
    fn read_time(&mut self) -> Time {
        match self.read_hms(REG_RTCSEC) {
            Ok(time) => self.snapshot.time = time,
            Err(e) => log::warn!("MCP7940N time read failed: {}", e),
        }
        self.snapshot.time
    }

    fn write_time(&mut self, time: Time) {
        let regs = [
            dec_to_bcd(time.seconds) | SEC_ST,
            dec_to_bcd(time.minutes),
            dec_to_bcd(time.hours), // bit 6 clear: 24-hour mode
        ];
        report("time write", self.write_registers(REG_RTCSEC, &regs));
    }

    fn read_date(&mut self) -> Date {
        match self.read_date_registers() {
            Ok(date) => self.snapshot.date = date,
            Err(e) => log::warn!("MCP7940N date read failed: {}", e),
        }
        self.snapshot.date
    }

    fn write_date(&mut self, date: Date) {
        // The chip tracks the leap-year flag itself.
        let regs = [dec_to_bcd(date.day), dec_to_bcd(date.month), dec_to_bcd(date.year)];
        report("date write", self.write_registers(REG_RTCDATE, &regs));
    }

    fn read_alarm(&mut self) -> AlarmTime {
        match self.read_hms(REG_ALM0SEC) {
            Ok(alarm) => self.snapshot.alarm = alarm,
            Err(e) => log::warn!("MCP7940N alarm read failed: {}", e),
        }
        self.snapshot.alarm
    }

    /// Alarm 0 registers only store the time; matching happens in the loop.
    fn write_alarm(&mut self, alarm: AlarmTime) {
        let regs = [
            dec_to_bcd(alarm.seconds),
            dec_to_bcd(alarm.minutes),
            dec_to_bcd(alarm.hours),
        ];
        report("alarm write", self.write_registers(REG_ALM0SEC, &regs));
    }

    fn set_alarm_enabled(&mut self, enabled: bool) {
        let result = self.read_register(REG_CONTROL).and_then(|control| {
            let control = if enabled {
                control | CONTROL_ALM0EN
            } else {
                control & !CONTROL_ALM0EN
            };
            self.write_registers(REG_CONTROL, &[control])
        });
        report("alarm enable", result);
    }

    fn read_weekday(&mut self) -> Weekday {
        match self.read_weekday_register() {
            Ok(weekday) => self.snapshot.weekday = weekday,
            Err(e) => log::warn!("MCP7940N weekday read failed: {}", e),
        }
        self.snapshot.weekday
    }

    fn write_weekday(&mut self, day: u8) {
        let Some(weekday) = Weekday::new(day) else {
            log::warn!("Ignoring weekday {}", day);
            return;
        };
        let result = self.read_register(REG_RTCWKDAY).and_then(|raw| {
            self.write_registers(REG_RTCWKDAY, &[(raw & !0x07) | weekday.number()])
        });
        report("weekday write", result);
    }
}
