#[cfg(feature = "esp")]
pub mod esp;

// スタブ実装（テストとnon-espビルドで使用可能）
pub mod stub;

#[cfg(feature = "esp")]
pub use esp::EspAdc;
pub use stub::AdcStub;

/// ADC（アナログ-デジタル変換器）のトレイト
///
/// このトレイトを実装することで、実機用とテスト用(Stub)の
/// 実装を切り替えることができます。
pub trait Adc {
    /// ADC分解能（ビット）
    fn resolution(&self) -> u8;

    /// ADCの最大デジタル値（`2^resolution - 1`）
    fn max_value(&self) -> u16;

    /// ADC供給電圧（V）
    fn supply_voltage(&self) -> f64;

    /// 指定チャンネルのデジタル値を読み取る
    fn read(&mut self, channel: u8) -> u16;

    /// 指定チャンネルのデューティ比（0.0 - 1.0）
    fn duty_cycle(&mut self, channel: u8) -> f64 {
        f64::from(self.read(channel)) / f64::from(self.max_value())
    }

    /// 指定チャンネルの入力電圧（V）
    fn input_voltage(&mut self, channel: u8) -> f64 {
        self.duty_cycle(channel) * self.supply_voltage()
    }

    /// ADCが初期化済みかどうか
    fn is_initialized(&self) -> bool;

    /// ADCが有効かどうか
    fn is_enabled(&self) -> bool;

    /// ADCの有効/無効を設定する
    fn set_enabled(&mut self, enable: bool);

    /// 指定チャンネルが有効かどうか
    fn is_channel_valid(&self, channel: u8) -> bool;
}

/// 分解能を1-16ビットに制限する
pub(crate) fn clamp_resolution(resolution: u8) -> u8 {
    resolution.clamp(1, 16)
}

/// 分解能から最大デジタル値を計算する
pub(crate) fn max_value_for(resolution: u8) -> u16 {
    match resolution {
        0 => 0,
        1..=15 => (1u16 << resolution) - 1,
        _ => u16::MAX,
    }
}
