use core::borrow::Borrow;

use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::gpio::ADCPin;
use log::{error, info};

use super::{clamp_resolution, max_value_for, Adc};

/// ESP32のワンショットADCチャンネルを使用したADC実装
///
/// 1つのADCチャンネルドライバーをラップするため、有効なチャンネルは
/// 作成時に指定したチャンネル番号のみです。
pub struct EspAdc<'d, T, M>
where
    T: ADCPin,
    M: Borrow<AdcDriver<'d, T::Adc>>,
{
    channel_driver: AdcChannelDriver<'d, T, M>,
    channel: u8,
    resolution: u8,
    max_value: u16,
    supply_voltage: f64,
    enabled: bool,
}

impl<'d, T, M> EspAdc<'d, T, M>
where
    T: ADCPin,
    M: Borrow<AdcDriver<'d, T::Adc>>,
{
    /// 初期化済みのチャンネルドライバーからADCを作成します
    ///
    /// # 引数
    /// * `channel_driver` - ワンショットADCチャンネルドライバー
    /// * `channel` - センサー側から指定するチャンネル番号
    /// * `resolution` - ADC分解能（ESP32S3は12ビット、1-16ビットに制限）
    /// * `supply_voltage` - 入力電圧範囲の上限（V）
    pub fn new(
        channel_driver: AdcChannelDriver<'d, T, M>,
        channel: u8,
        resolution: u8,
        supply_voltage: f64,
    ) -> Self {
        let resolution = clamp_resolution(resolution);
        info!(
            "ADCを初期化しました (チャンネル: {}, 分解能: {}ビット, 供給電圧: {:.2}V)",
            channel, resolution, supply_voltage
        );
        Self {
            channel_driver,
            channel,
            resolution,
            max_value: max_value_for(resolution),
            supply_voltage,
            enabled: true,
        }
    }
}

impl<'d, T, M> Adc for EspAdc<'d, T, M>
where
    T: ADCPin,
    M: Borrow<AdcDriver<'d, T::Adc>>,
{
    fn resolution(&self) -> u8 {
        self.resolution
    }

    fn max_value(&self) -> u16 {
        self.max_value
    }

    fn supply_voltage(&self) -> f64 {
        self.supply_voltage
    }

    fn read(&mut self, channel: u8) -> u16 {
        if !self.enabled || !self.is_channel_valid(channel) {
            return 0;
        }
        match self.channel_driver.read_raw() {
            Ok(raw) => raw.min(self.max_value),
            Err(e) => {
                error!("ADC読み取りエラー: {:?}. 0として扱います。", e);
                0
            }
        }
    }

    fn is_initialized(&self) -> bool {
        // チャンネルドライバーの作成に成功していれば初期化済み
        true
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enable: bool) {
        self.enabled = enable;
    }

    fn is_channel_valid(&self, channel: u8) -> bool {
        channel == self.channel
    }
}
