//! 単一入力の線形回帰モデル（ハードウェア非依存）
//!
//! スマート温度センサーのキャリブレーションに使用します。
//! 学習はフルバッチの勾配降下法で行い、乱数やシャッフルは使用しないため
//! 同じ入力に対して常に同じ結果になります。

use std::fmt;

/// 学習失敗の理由
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrainError {
    /// 入力データが空
    EmptyInputs,
    /// 目標データが空
    EmptyTargets,
    /// 入力と目標の件数が一致しない
    LengthMismatch { inputs: usize, targets: usize },
    /// エポック数が0
    ZeroEpochs,
    /// 学習率が (0, 1] の範囲外
    InvalidLearningRate(f64),
}

impl fmt::Display for TrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainError::EmptyInputs => write!(f, "training inputs are empty"),
            TrainError::EmptyTargets => write!(f, "training targets are empty"),
            TrainError::LengthMismatch { inputs, targets } => write!(
                f,
                "training set length mismatch: {} inputs, {} targets",
                inputs, targets
            ),
            TrainError::ZeroEpochs => write!(f, "epoch count must be greater than 0"),
            TrainError::InvalidLearningRate(lr) => {
                write!(f, "learning rate {} is outside (0, 1]", lr)
            }
        }
    }
}

impl std::error::Error for TrainError {}

/// 線形回帰モデルのインターフェース
///
/// このトレイトを実装することで、センサー側はモデルの実装を意識せずに
/// 推論と学習状態の確認ができます。
pub trait LinearRegression {
    /// モデルが学習済みかどうか
    fn is_trained(&self) -> bool;

    /// 入力値から出力を推論する
    ///
    /// 未学習の場合は常に `0.0` を返します。
    fn predict(&self, input: f64) -> f64;

    /// 学習データでモデルを学習する
    ///
    /// 失敗した場合、学習状態とパラメータは変更されません。
    fn train(
        &mut self,
        inputs: &[f64],
        targets: &[f64],
        epoch_count: usize,
        learning_rate: f64,
    ) -> Result<(), TrainError>;

    /// 学習データに対する平均二乗誤差
    ///
    /// 未学習、または学習データが不正な場合は `None` を返します。
    fn mean_squared_error(&self, inputs: &[f64], targets: &[f64]) -> Option<f64> {
        if !self.is_trained() {
            return None;
        }
        validate_training_set(inputs, targets).ok()?;

        let sum: f64 = inputs
            .iter()
            .zip(targets)
            .map(|(x, y)| {
                let error = self.predict(*x) - y;
                error * error
            })
            .sum();
        Some(sum / inputs.len() as f64)
    }
}

/// 重み1つ、バイアス1つの線形回帰モデル
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinReg {
    weight: f64,
    bias: f64,
    trained: bool,
}

impl LinReg {
    /// 未学習のモデルを作成
    pub const fn new() -> Self {
        Self {
            weight: 0.0,
            bias: 0.0,
            trained: false,
        }
    }

    /// 学習済みの重み（未学習なら `None`）
    pub fn weight(&self) -> Option<f64> {
        self.trained.then_some(self.weight)
    }

    /// 学習済みのバイアス（未学習なら `None`）
    pub fn bias(&self) -> Option<f64> {
        self.trained.then_some(self.bias)
    }

}

impl LinearRegression for LinReg {
    fn is_trained(&self) -> bool {
        self.trained
    }

    fn predict(&self, input: f64) -> f64 {
        if !self.trained {
            return 0.0;
        }
        self.weight * input + self.bias
    }

    fn train(
        &mut self,
        inputs: &[f64],
        targets: &[f64],
        epoch_count: usize,
        learning_rate: f64,
    ) -> Result<(), TrainError> {
        validate_training_set(inputs, targets)?;
        if epoch_count == 0 {
            return Err(TrainError::ZeroEpochs);
        }
        // NaN も範囲外として扱う
        if !(learning_rate > 0.0 && learning_rate <= 1.0) {
            return Err(TrainError::InvalidLearningRate(learning_rate));
        }

        let (weight, bias) = gradient_descent(inputs, targets, epoch_count, learning_rate);

        self.weight = weight;
        self.bias = bias;
        self.trained = true;
        Ok(())
    }
}

fn validate_training_set(inputs: &[f64], targets: &[f64]) -> Result<(), TrainError> {
    if inputs.is_empty() {
        return Err(TrainError::EmptyInputs);
    }
    if targets.is_empty() {
        return Err(TrainError::EmptyTargets);
    }
    if inputs.len() != targets.len() {
        return Err(TrainError::LengthMismatch {
            inputs: inputs.len(),
            targets: targets.len(),
        });
    }
    Ok(())
}

/// フルバッチ勾配降下法（常に重み0、バイアス0から開始）
fn gradient_descent(
    inputs: &[f64],
    targets: &[f64],
    epoch_count: usize,
    learning_rate: f64,
) -> (f64, f64) {
    let n = inputs.len() as f64;
    let mut weight = 0.0_f64;
    let mut bias = 0.0_f64;

    for _ in 0..epoch_count {
        let (grad_w, grad_b) = inputs.iter().zip(targets).fold(
            (0.0_f64, 0.0_f64),
            |(gw, gb), (x, y)| {
                let error = weight * x + bias - y;
                (gw + error * x, gb + error)
            },
        );

        weight -= learning_rate * (2.0 / n) * grad_w;
        bias -= learning_rate * (2.0 / n) * grad_b;
    }

    (weight, bias)
}
