// Roll Clock — Piezo Buzzer Driver
//
// LEDC PWM at a fixed 50 % duty while sounding, 0 % while silent.

use esp_idf_hal::ledc::LedcDriver;
use esp_idf_sys::{esp, ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_set_freq, ledc_timer_t_LEDC_TIMER_0};

use rollclock::config::BUZZER_DUTY_PERCENT;
use rollclock::providers::Buzzer;

pub struct PiezoBuzzer {
    channel: LedcDriver<'static>,
}

impl PiezoBuzzer {
    /// `channel` must be bound to LEDC timer 0.
    pub fn new(channel: LedcDriver<'static>) -> Self {
        Self { channel }
    }

    fn set_duty_percent(&mut self, percent: u32) -> anyhow::Result<()> {
        let duty = self.channel.get_max_duty() * percent / 100;
        self.channel.set_duty(duty)?;
        Ok(())
    }
}

impl Buzzer for PiezoBuzzer {
    fn set_tone_frequency(&mut self, hz: u32) {
        // SAFETY: plain register update on the timer this channel was built on.
        let result = esp!(unsafe { ledc_set_freq(ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_timer_t_LEDC_TIMER_0, hz) });
        match result {
            Ok(()) => log::debug!("Buzzer tone {} Hz", hz),
            Err(e) => log::warn!("Buzzer frequency change failed: {}", e),
        }
    }

    fn start(&mut self) {
        if let Err(e) = self.set_duty_percent(BUZZER_DUTY_PERCENT) {
            log::warn!("Buzzer start failed: {}", e);
        }
    }

    fn stop(&mut self) {
        if let Err(e) = self.set_duty_percent(0) {
            log::warn!("Buzzer stop failed: {}", e);
        }
    }
}
