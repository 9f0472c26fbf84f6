/// アプリケーション設定
///
/// この構造体はビルド時に`cfg.toml`ファイルから読み込まれた設定を保持します。
/// `cfg.toml`が存在しない場合はデフォルト値が使用されます。
#[toml_cfg::toml_config]
pub struct Config {
    #[default(10)]
    adc_resolution_bits: u8,

    #[default(5.0)]
    adc_supply_voltage: f64,

    #[default(0)]
    sensor_pin: u8,

    // キャリブレーション設定
    #[default(5000)]
    epoch_count: usize,

    #[default(0.01)]
    learning_rate: f64,

    #[default(31)]
    calibration_step: u16,
}

/// 設定エラー
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("adc_resolution_bits の値が無効です (1-16): {0}")]
    InvalidResolution(u8),
    #[error("adc_supply_voltage は正の値である必要があります: {0}")]
    InvalidSupplyVoltage(f64),
    #[error("epoch_count は1以上である必要があります")]
    InvalidEpochCount,
    #[error("learning_rate の値が無効です (0, 1]: {0}")]
    InvalidLearningRate(f64),
    #[error("calibration_step は1以上である必要があります")]
    InvalidCalibrationStep,
}

/// 検証済みのアプリケーション設定
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// ADC分解能（ビット）
    pub adc_resolution_bits: u8,

    /// ADC供給電圧（V）
    pub adc_supply_voltage: f64,

    /// 温度センサーのADCチャンネル
    pub sensor_pin: u8,

    /// キャリブレーションのエポック数
    pub epoch_count: usize,

    /// キャリブレーションの学習率
    pub learning_rate: f64,

    /// キャリブレーション時のADC値の刻み幅
    pub calibration_step: u16,
}

impl AppConfig {
    /// 設定ファイルから設定をロードします
    pub fn load() -> Result<Self, ConfigError> {
        // toml_cfg によって生成された定数
        Self::from_config(&CONFIG)
    }

    /// 生の設定値を検証して `AppConfig` を作成します
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        if !(1..=16).contains(&config.adc_resolution_bits) {
            return Err(ConfigError::InvalidResolution(config.adc_resolution_bits));
        }
        if !(config.adc_supply_voltage > 0.0) {
            return Err(ConfigError::InvalidSupplyVoltage(config.adc_supply_voltage));
        }
        if config.epoch_count == 0 {
            return Err(ConfigError::InvalidEpochCount);
        }
        if !(config.learning_rate > 0.0 && config.learning_rate <= 1.0) {
            return Err(ConfigError::InvalidLearningRate(config.learning_rate));
        }
        if config.calibration_step == 0 {
            return Err(ConfigError::InvalidCalibrationStep);
        }

        Ok(AppConfig {
            adc_resolution_bits: config.adc_resolution_bits,
            adc_supply_voltage: config.adc_supply_voltage,
            sensor_pin: config.sensor_pin,
            epoch_count: config.epoch_count,
            learning_rate: config.learning_rate,
            calibration_step: config.calibration_step,
        })
    }
}
