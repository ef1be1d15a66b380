//! Raspberry Pi servo backend using `rppal` software PWM.
//!
//! Drives standard hobby servos (50 Hz, 500–2500 µs pulse band) directly
//! from GPIO pins. Each channel's output port number doubles as the BCM
//! pin number.

use std::collections::HashMap;

use rppal::gpio::{Gpio, OutputPin};
use tracing::debug;

use crate::channel::Channel;
use crate::error::{RigError, RigResult};
use crate::servo::ServoBank;

/// Standard hobby-servo PWM frequency.
const PWM_FREQUENCY: f64 = 50.0;

/// Pulse width commanding 0 degrees, in microseconds.
const MIN_PULSE_US: f64 = 500.0;

/// Pulse width commanding 180 degrees, in microseconds.
const MAX_PULSE_US: f64 = 2500.0;

/// PWM period at 50 Hz, in microseconds.
const PERIOD_US: f64 = 20_000.0;

/// Servo bank driving hobby servos through GPIO software PWM.
pub struct GpioServoBank {
    gpio: Gpio,
    pins: HashMap<Channel, OutputPin>,
}

impl GpioServoBank {
    /// Acquire the GPIO peripheral. Pins are claimed on attach.
    pub fn new() -> RigResult<Self> {
        let gpio = Gpio::new().map_err(|e| RigError::Driver(e.to_string()))?;
        Ok(Self {
            gpio,
            pins: HashMap::new(),
        })
    }
}

impl ServoBank for GpioServoBank {
    fn attach(&mut self, channel: Channel) -> RigResult<()> {
        let pin = self
            .gpio
            .get(channel.port())
            .map_err(|e| RigError::Driver(e.to_string()))?
            .into_output();
        debug!("channel {} attached to GPIO {}", channel, channel.port());
        self.pins.insert(channel, pin);
        Ok(())
    }

    fn write(&mut self, channel: Channel, angle: i32) -> RigResult<()> {
        let pin = self
            .pins
            .get_mut(&channel)
            .ok_or_else(|| RigError::Driver(format!("channel {channel} not attached")))?;

        // Servo hardware only spans 0-180 degrees; commanded angles
        // outside that band saturate at the end stops.
        let clamped = angle.clamp(0, 180) as f64;
        let pulse_us = MIN_PULSE_US + clamped / 180.0 * (MAX_PULSE_US - MIN_PULSE_US);
        let duty_cycle = pulse_us / PERIOD_US;

        pin.set_pwm_frequency(PWM_FREQUENCY, duty_cycle)
            .map_err(|e| RigError::Driver(e.to_string()))?;
        Ok(())
    }
}
