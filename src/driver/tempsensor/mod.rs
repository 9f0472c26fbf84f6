pub mod smart;
pub mod tmp36;

pub use smart::Smart;
pub use tmp36::Tmp36;

/// センサー未初期化時に `read` が返す温度
pub const DEFAULT_TEMPERATURE: i16 = 0;

/// 温度センサーのエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SensorError {
    #[error("温度センサーが初期化されていません (pin: {pin})")]
    NotInitialized { pin: u8 },
}

/// 温度センサーのトレイト
pub trait TempSensor {
    /// センサーが初期化済みかどうか
    ///
    /// 呼び出しごとにADC（とモデル）の状態を確認します。
    fn is_initialized(&self) -> bool;

    /// 温度（℃）を読み取り、最も近い整数に丸めて返す
    ///
    /// 未初期化の場合はADCを読み取らずにエラーを返します。
    fn try_read(&mut self) -> Result<i16, SensorError>;

    /// 温度（℃）を読み取る
    ///
    /// 未初期化の場合は [`DEFAULT_TEMPERATURE`] を返します。
    fn read(&mut self) -> i16 {
        self.try_read().unwrap_or(DEFAULT_TEMPERATURE)
    }
}
