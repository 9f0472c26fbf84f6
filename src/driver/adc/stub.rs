use super::{clamp_resolution, max_value_for, Adc};
use std::cell::Cell;
use std::rc::Rc;

/// デフォルトのADC分解能（ビット）
pub const DEFAULT_RESOLUTION: u8 = 10;

/// デフォルトの供給電圧（V）
pub const DEFAULT_SUPPLY_VOLTAGE: f64 = 5.0;

#[derive(Debug, Clone, Copy)]
struct AdcState {
    value: u16,
    initialized: bool,
    enabled: bool,
    channel_valid: bool,
}

/// テスト用のADCスタブ実装
///
/// 実際のハードウェアを使わずにADCの入力値をシミュレートします。
/// クローンしたハンドルは同じ状態を共有するため、センサーに渡した後でも
/// テスト側から入力値や初期化状態を変更できます。
#[derive(Debug, Clone)]
pub struct AdcStub {
    resolution: u8,
    max_value: u16,
    supply_voltage: f64,
    state: Rc<Cell<AdcState>>,
}

impl Default for AdcStub {
    fn default() -> Self {
        Self::new()
    }
}

impl AdcStub {
    /// 10ビット、5Vの新しいADCスタブを作成します
    pub fn new() -> Self {
        Self::with_params(DEFAULT_RESOLUTION, DEFAULT_SUPPLY_VOLTAGE)
    }

    /// 分解能と供給電圧を指定してADCスタブを作成します
    ///
    /// 分解能は1-16ビットに制限されます。
    pub fn with_params(resolution: u8, supply_voltage: f64) -> Self {
        let resolution = clamp_resolution(resolution);
        Self {
            resolution,
            max_value: max_value_for(resolution),
            supply_voltage,
            state: Rc::new(Cell::new(AdcState {
                value: 0,
                initialized: true,
                enabled: true,
                channel_valid: true,
            })),
        }
    }

    /// テスト用: ADC値（仮想入力）を設定
    ///
    /// 最大値を超える値は無視されます。
    pub fn set_value(&self, value: u16) {
        if value <= self.max_value {
            self.update(|state| state.value = value);
        }
    }

    /// テスト用: 現在のADC値を取得
    pub fn value(&self) -> u16 {
        self.state.get().value
    }

    /// テスト用: 初期化状態を設定
    pub fn set_initialized(&self, initialized: bool) {
        self.update(|state| state.initialized = initialized);
    }

    /// テスト用: 全チャンネルの有効性を設定
    pub fn set_channel_validity(&self, valid: bool) {
        self.update(|state| state.channel_valid = valid);
    }

    fn update(&self, f: impl FnOnce(&mut AdcState)) {
        let mut state = self.state.get();
        f(&mut state);
        self.state.set(state);
    }
}

impl Adc for AdcStub {
    fn resolution(&self) -> u8 {
        self.resolution
    }

    fn max_value(&self) -> u16 {
        self.max_value
    }

    fn supply_voltage(&self) -> f64 {
        self.supply_voltage
    }

    fn read(&mut self, _channel: u8) -> u16 {
        let state = self.state.get();
        if state.enabled {
            state.value
        } else {
            0
        }
    }

    fn is_initialized(&self) -> bool {
        self.state.get().initialized
    }

    fn is_enabled(&self) -> bool {
        self.state.get().enabled
    }

    fn set_enabled(&mut self, enable: bool) {
        self.update(|state| state.enabled = enable);
    }

    fn is_channel_valid(&self, _channel: u8) -> bool {
        self.state.get().channel_valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stub() {
        let adc = AdcStub::new();
        assert_eq!(adc.resolution(), 10);
        assert_eq!(adc.max_value(), 1023);
        assert_eq!(adc.supply_voltage(), 5.0);
        assert!(adc.is_initialized());
        assert!(adc.is_enabled());
        assert!(adc.is_channel_valid(0));
    }

    #[test]
    fn test_set_value_ignores_out_of_range() {
        let adc = AdcStub::new();
        adc.set_value(1023);
        assert_eq!(adc.value(), 1023);

        adc.set_value(1024);
        assert_eq!(adc.value(), 1023);
    }

    #[test]
    fn test_input_voltage() {
        let mut adc = AdcStub::new();
        adc.set_value(100);

        // 100 / 1023 * 5V ≈ 0.4888V
        let voltage = adc.input_voltage(0);
        assert!((voltage - 0.488758).abs() < 1e-6);
        assert!((adc.duty_cycle(0) - 100.0 / 1023.0).abs() < 1e-12);
    }

    #[test]
    fn test_disabled_adc_reads_zero() {
        let mut adc = AdcStub::new();
        adc.set_value(512);
        adc.set_enabled(false);

        assert_eq!(adc.read(0), 0);
        assert_eq!(adc.input_voltage(0), 0.0);

        adc.set_enabled(true);
        assert_eq!(adc.read(0), 512);
    }

    #[test]
    fn test_clones_share_state() {
        let adc = AdcStub::new();
        let mut handle = adc.clone();

        adc.set_value(42);
        adc.set_initialized(false);
        adc.set_channel_validity(false);

        assert_eq!(handle.read(3), 42);
        assert!(!handle.is_initialized());
        assert!(!handle.is_channel_valid(3));
    }

    #[test]
    fn test_custom_resolution() {
        let adc = AdcStub::with_params(12, 3.3);
        assert_eq!(adc.max_value(), 4095);
        assert_eq!(adc.supply_voltage(), 3.3);

        let adc = AdcStub::with_params(0, 3.3);
        assert_eq!(adc.resolution(), 1);
        assert_eq!(adc.max_value(), 1);
    }
}
