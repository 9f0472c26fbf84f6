/*!
 * # Smart Temperature Sensor Library
 *
 * ADC/GPIOのハードウェア抽象化と、線形回帰モデルでキャリブレーションする
 * スマート温度センサーを提供するライブラリ
 *
 * ## モジュール構成
 * - `driver`: ハードウェア抽象化（ADC、GPIO、温度センサー）
 * - `calibration`: 学習データの作成とモデルの学習
 * - `config`: ビルド時設定（cfg.toml）
 * - `utils`: 丸め処理などのユーティリティ
 *
 * ホスト上のテストではスタブ実装を使用し、`esp` フィーチャーを有効にすると
 * ESP-IDFを使用した実機用の実装が利用できます。
 */

pub mod calibration;
pub mod config;
pub mod driver;
pub mod utils;

// 内部で使用する型をまとめてエクスポート
pub use calibration::{CalibrationError, Calibrator, TrainingSet};
pub use config::{AppConfig, ConfigError};
pub use driver::{Adc, AdcStub, Gpio, GpioStub, SensorError, Smart, TempSensor, Tmp36};
pub use lin_reg_core::{LinReg, LinearRegression, TrainError};

/// ライブラリのバージョン情報
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
