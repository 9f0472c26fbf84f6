use log::debug;

use super::{SensorError, TempSensor};
use crate::driver::adc::Adc;
use crate::utils::round_to_i16;

/// TMP36の変換式で電圧（V）を温度（℃）に変換する: T = 100 * V - 50
pub fn voltage_to_celsius(input_voltage: f64) -> f64 {
    100.0 * input_voltage - 50.0
}

/// TMP36アナログ温度センサー
///
/// ADCの入力電圧を固定の変換式で温度に変換します。
pub struct Tmp36<A: Adc> {
    adc: A,
    pin: u8,
}

impl<A: Adc> Tmp36<A> {
    /// 新しいTMP36センサーを作成します
    ///
    /// 初期化に成功した場合はADCを有効にします。
    pub fn new(pin: u8, adc: A) -> Self {
        let mut sensor = Self { adc, pin };
        if sensor.is_initialized() {
            sensor.adc.set_enabled(true);
        } else {
            debug!("TMP36が初期化されていません (pin: {})", pin);
        }
        sensor
    }

    /// センサーのADCチャンネル
    pub fn pin(&self) -> u8 {
        self.pin
    }

    pub fn adc(&self) -> &A {
        &self.adc
    }

    pub fn adc_mut(&mut self) -> &mut A {
        &mut self.adc
    }
}

impl<A: Adc> TempSensor for Tmp36<A> {
    fn is_initialized(&self) -> bool {
        self.adc.is_initialized() && self.adc.is_channel_valid(self.pin)
    }

    fn try_read(&mut self) -> Result<i16, SensorError> {
        if !self.is_initialized() {
            return Err(SensorError::NotInitialized { pin: self.pin });
        }
        let input_voltage = self.adc.input_voltage(self.pin);
        Ok(round_to_i16(voltage_to_celsius(input_voltage)))
    }
}
