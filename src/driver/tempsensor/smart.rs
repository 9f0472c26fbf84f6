use lin_reg_core::LinearRegression;
use log::debug;

use super::{SensorError, TempSensor};
use crate::driver::adc::Adc;
use crate::utils::round_to_i16;

/// スマート温度センサー
///
/// ADCの入力電圧を線形回帰モデルで温度に変換します。
/// ADCが初期化済み、チャンネルが有効、かつモデルが学習済みの場合のみ
/// 初期化済みとして扱います。
pub struct Smart<A: Adc, M: LinearRegression> {
    adc: A,
    lin_reg: M,
    pin: u8,
}

impl<A: Adc, M: LinearRegression> Smart<A, M> {
    /// 新しいスマート温度センサーを作成します
    ///
    /// 初期化に成功した場合はADCを有効にします。
    pub fn new(pin: u8, adc: A, lin_reg: M) -> Self {
        let mut sensor = Self { adc, lin_reg, pin };
        if sensor.is_initialized() {
            sensor.adc.set_enabled(true);
        } else {
            debug!(
                "スマート温度センサーが初期化されていません (pin: {}, 学習済み: {})",
                pin,
                sensor.lin_reg.is_trained()
            );
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

    pub fn model(&self) -> &M {
        &self.lin_reg
    }

    /// モデルへの可変参照（再学習用）
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.lin_reg
    }
}

impl<A: Adc, M: LinearRegression> TempSensor for Smart<A, M> {
    fn is_initialized(&self) -> bool {
        self.adc.is_initialized() && self.adc.is_channel_valid(self.pin) && self.lin_reg.is_trained()
    }

    fn try_read(&mut self) -> Result<i16, SensorError> {
        if !self.is_initialized() {
            return Err(SensorError::NotInitialized { pin: self.pin });
        }
        let input_voltage = self.adc.input_voltage(self.pin);
        let predicted_temp = self.lin_reg.predict(input_voltage);
        Ok(round_to_i16(predicted_temp))
    }
}
