/// TMP36温度センサーのテスト
///
/// ADCスタブを使用して、初期化条件と変換精度を検証します。

use smart_temp_sensor::driver::tempsensor::DEFAULT_TEMPERATURE;
use smart_temp_sensor::utils::round_to_i16;
use smart_temp_sensor::{AdcStub, TempSensor, Tmp36};

fn compute_input_voltage(adc_value: u16) -> f64 {
    let supply_voltage = 5.0;
    let adc_max = 1023.0;
    f64::from(adc_value) / adc_max * supply_voltage
}

fn convert_to_temp(adc_value: u16) -> i16 {
    // T(°C) = 100 * V - 50
    round_to_i16(100.0 * compute_input_voltage(adc_value) - 50.0)
}

#[test]
fn test_initialization() {
    let adc_value = 100;
    let expected_temp = convert_to_temp(adc_value);

    let adc = AdcStub::new();
    adc.set_value(adc_value);

    // ケース1: 有効なピン
    {
        adc.set_channel_validity(true);
        adc.set_initialized(true);
        let mut sensor = Tmp36::new(0, adc.clone());

        assert!(sensor.is_initialized());
        assert_eq!(sensor.read(), expected_temp);
    }

    // ケース2: 無効なピン
    {
        adc.set_channel_validity(false);
        adc.set_initialized(true);
        let mut sensor = Tmp36::new(10, adc.clone());

        assert!(!sensor.is_initialized());
        assert_eq!(sensor.read(), DEFAULT_TEMPERATURE);
    }

    // ケース3: ADCが未初期化
    {
        adc.set_channel_validity(true);
        adc.set_initialized(false);
        let mut sensor = Tmp36::new(0, adc.clone());

        assert!(!sensor.is_initialized());
        assert_eq!(sensor.read(), DEFAULT_TEMPERATURE);
    }
}

#[test]
fn test_end_to_end_example() {
    // 10ビット、5V、ADC値100 → 約0.4888V → round(-1.12) = -1
    let adc = AdcStub::with_params(10, 5.0);
    adc.set_value(100);
    let mut sensor = Tmp36::new(0, adc);

    assert_eq!(sensor.read(), -1);
}

#[test]
fn test_accuracy() {
    let adc = AdcStub::new();

    // トレイトオブジェクトとして使用する
    let mut sensor: Box<dyn TempSensor> = Box::new(Tmp36::new(0, adc.clone()));
    assert!(sensor.is_initialized());

    for adc_value in (0..=1000).step_by(10) {
        adc.set_value(adc_value);
        assert_eq!(sensor.read(), convert_to_temp(adc_value));
    }
}

#[test]
fn test_state_change_after_construction() {
    let adc = AdcStub::new();
    adc.set_value(500);
    let mut sensor = Tmp36::new(0, adc.clone());
    assert!(sensor.is_initialized());

    // 初期化状態は毎回評価される
    adc.set_initialized(false);
    assert!(!sensor.is_initialized());
    assert!(sensor.try_read().is_err());

    adc.set_initialized(true);
    assert_eq!(sensor.read(), convert_to_temp(500));
}
