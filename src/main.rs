use log::{error, info, warn};

use smart_temp_sensor::calibration::{self, Calibrator};
use smart_temp_sensor::driver::tempsensor::tmp36::voltage_to_celsius;
use smart_temp_sensor::{
    Adc, AdcStub, AppConfig, Gpio, GpioStub, LinReg, Smart, TempSensor, Tmp36, VERSION,
};

/// 比較表示するADC値の数
const COMPARISON_POINTS: u16 = 8;

fn init_logger() {
    #[cfg(feature = "esp")]
    {
        esp_idf_sys::link_patches();
        esp_idf_svc::log::EspLogger::initialize_default();
    }

    #[cfg(not(feature = "esp"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// アプリケーションのメインエントリーポイント
///
/// ADCスタブ上でスマート温度センサーをキャリブレーションし、
/// TMP36の変換式と比較した結果をログに出力します。
fn main() -> anyhow::Result<()> {
    init_logger();
    info!("smart-temp-sensor v{}", VERSION);

    // 設定ファイル読み込み
    let app_config = AppConfig::load().map_err(|e| {
        error!("設定ファイルの読み込みに失敗しました: {}", e);
        anyhow::anyhow!("設定ファイルの読み込みエラー: {}", e)
    })?;
    info!("設定: {:?}", app_config);

    let pin = app_config.sensor_pin;
    let adc = AdcStub::with_params(
        app_config.adc_resolution_bits,
        app_config.adc_supply_voltage,
    );

    // TMP36の変換式を基準温度として学習データを作成
    let training_set =
        calibration::sweep_stub(&adc, pin, app_config.calibration_step, voltage_to_celsius)?;

    let mut model = LinReg::new();
    Calibrator::from_config(&app_config).calibrate(&mut model, &training_set)?;
    if let (Some(weight), Some(bias)) = (model.weight(), model.bias()) {
        info!("学習結果: T = {:.4} * V + {:.4}", weight, bias);
    }

    let mut tmp36 = Tmp36::new(pin, adc.clone());
    let mut smart = Smart::new(pin, adc.clone(), model);
    let mut probe = adc.clone();

    let step = (adc.max_value() / COMPARISON_POINTS).max(1);
    let mut mismatches = 0;
    for value in (0..=adc.max_value()).step_by(usize::from(step)) {
        adc.set_value(value);
        let voltage = probe.input_voltage(pin);
        let reference = tmp36.read();
        let predicted = smart.read();

        info!(
            "ADC: {:>5}, 電圧: {:.3} V, TMP36: {:>4} °C, Smart: {:>4} °C",
            value, voltage, reference, predicted
        );
        if reference != predicted {
            warn!("温度が一致しません (ADC: {})", value);
            mismatches += 1;
        }
    }

    // ステータスLED: 一致すれば点灯
    let mut status_led = GpioStub::new();
    status_led.write(mismatches == 0);

    if mismatches == 0 {
        info!("✓ スマート温度センサーはTMP36と一致しました");
    } else {
        warn!("{}件の不一致がありました", mismatches);
    }
    info!("ステータスLED: {}", if status_led.read() { "ON" } else { "OFF" });

    Ok(())
}
