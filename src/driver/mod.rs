/// ハードウェア抽象化モジュール
pub mod adc;
pub mod gpio;
pub mod tempsensor;

pub use adc::{Adc, AdcStub};
pub use gpio::{Direction, Gpio, GpioStub};
pub use tempsensor::{SensorError, Smart, TempSensor, Tmp36};
