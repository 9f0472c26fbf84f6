use esp_idf_hal::gpio::{IOPin, InputOutput, Level, PinDriver};
use log::{error, warn};

use super::{Direction, Gpio};

/// ESP32のPinDriverを使用したGPIO実装
pub struct EspGpio<'d, T: IOPin> {
    pin: Option<PinDriver<'d, T, InputOutput>>,
    interrupt_enabled: bool,
}

impl<'d, T: IOPin> EspGpio<'d, T> {
    /// ピンを入出力モードで初期化します
    ///
    /// 初期化に失敗した場合は未初期化のGPIOとして動作します。
    pub fn new(pin: T) -> Self {
        let pin = match PinDriver::input_output(pin) {
            Ok(driver) => Some(driver),
            Err(e) => {
                error!("GPIOの初期化に失敗しました: {:?}", e);
                None
            }
        };

        Self {
            pin,
            interrupt_enabled: false,
        }
    }

    fn set_interrupt(&mut self, enable: bool) {
        let Some(pin) = self.pin.as_mut() else {
            return;
        };
        let result = if enable {
            pin.enable_interrupt()
        } else {
            pin.disable_interrupt()
        };
        match result {
            Ok(()) => self.interrupt_enabled = enable,
            Err(e) => warn!("GPIO割り込みの設定に失敗しました: {:?}", e),
        }
    }
}

impl<'d, T: IOPin> Gpio for EspGpio<'d, T> {
    fn is_initialized(&self) -> bool {
        self.pin.is_some()
    }

    fn direction(&self) -> Direction {
        Direction::Output
    }

    fn read(&self) -> bool {
        self.pin.as_ref().is_some_and(|pin| pin.is_high())
    }

    fn write(&mut self, output: bool) {
        if let Some(pin) = self.pin.as_mut() {
            if let Err(e) = pin.set_level(Level::from(output)) {
                warn!("GPIO出力の書き込みに失敗しました: {:?}", e);
            }
        }
    }

    fn toggle(&mut self) {
        if let Some(pin) = self.pin.as_mut() {
            if let Err(e) = pin.toggle() {
                warn!("GPIO出力の反転に失敗しました: {:?}", e);
            }
        }
    }

    fn enable_interrupt(&mut self, enable: bool) {
        self.set_interrupt(enable);
    }

    fn enable_interrupt_on_port(&mut self, enable: bool) {
        // ESP32にはポート単位の割り込みがないため、ピン割り込みとして扱う
        self.set_interrupt(enable);
    }

    fn is_interrupt_enabled(&self) -> bool {
        self.interrupt_enabled
    }
}
