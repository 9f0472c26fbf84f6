use super::{Direction, Gpio};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy)]
struct GpioState {
    high: bool,
    initialized: bool,
    interrupt_enabled: bool,
}

/// テスト用のGPIOスタブ実装
///
/// クローンしたハンドルは同じ状態を共有します。
/// データ方向は常に入力として報告されます。
#[derive(Debug, Clone)]
pub struct GpioStub {
    state: Rc<Cell<GpioState>>,
}

impl Default for GpioStub {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioStub {
    /// 初期化済み、Low、割り込み無効のGPIOスタブを作成します
    pub fn new() -> Self {
        Self {
            state: Rc::new(Cell::new(GpioState {
                high: false,
                initialized: true,
                interrupt_enabled: false,
            })),
        }
    }

    /// テスト用: 初期化状態を設定
    ///
    /// 未初期化にすると出力と割り込みの状態がリセットされます。
    pub fn set_initialized(&self, initialized: bool) {
        let mut state = self.state.get();
        state.initialized = initialized;
        if !initialized {
            state.high = false;
            state.interrupt_enabled = false;
        }
        self.state.set(state);
    }

    // 初期化済みの場合のみ状態を更新する
    fn update_if_initialized(&self, f: impl FnOnce(&mut GpioState)) {
        let mut state = self.state.get();
        if state.initialized {
            f(&mut state);
            self.state.set(state);
        }
    }
}

impl Gpio for GpioStub {
    fn is_initialized(&self) -> bool {
        self.state.get().initialized
    }

    fn direction(&self) -> Direction {
        Direction::Input
    }

    fn read(&self) -> bool {
        self.state.get().high
    }

    fn write(&mut self, output: bool) {
        self.update_if_initialized(|state| state.high = output);
    }

    fn toggle(&mut self) {
        self.update_if_initialized(|state| state.high = !state.high);
    }

    fn enable_interrupt(&mut self, enable: bool) {
        self.update_if_initialized(|state| state.interrupt_enabled = enable);
    }

    fn enable_interrupt_on_port(&mut self, enable: bool) {
        self.update_if_initialized(|state| state.interrupt_enabled = enable);
    }

    fn is_interrupt_enabled(&self) -> bool {
        self.state.get().interrupt_enabled
    }
}
