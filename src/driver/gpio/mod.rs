#[cfg(feature = "esp")]
pub mod esp;

// スタブ実装（テストとnon-espビルドで使用可能）
pub mod stub;

#[cfg(feature = "esp")]
pub use esp::EspGpio;
pub use stub::GpioStub;

/// GPIOのデータ方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// 入力
    Input,
    /// 出力
    Output,
}

/// GPIOのトレイト
///
/// このトレイトを実装することで、実機用とテスト用(Stub)の
/// 実装を切り替えることができます。
pub trait Gpio {
    /// GPIOが初期化済みかどうか
    ///
    /// 未初期化のデバイスは、作成時にピンが使用できなかったか無効だったことを示します。
    fn is_initialized(&self) -> bool;

    /// データ方向を取得
    fn direction(&self) -> Direction;

    /// 入力を読み取る（true = High）
    fn read(&self) -> bool;

    /// 出力を書き込む（true = High）
    fn write(&mut self, output: bool);

    /// 出力を反転する
    fn toggle(&mut self);

    /// ピン変化割り込みの有効/無効を設定する
    fn enable_interrupt(&mut self, enable: bool);

    /// ピンが属するI/Oポートのピン変化割り込みの有効/無効を設定する
    fn enable_interrupt_on_port(&mut self, enable: bool);

    /// ピン変化割り込みが有効かどうか
    fn is_interrupt_enabled(&self) -> bool;
}
