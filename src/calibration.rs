//! スマート温度センサーのキャリブレーション
//!
//! ADCの入力電圧と基準温度の組から学習データを作成し、
//! 線形回帰モデルを学習させます。

use lin_reg_core::{LinearRegression, TrainError};
use log::{debug, info, warn};

use crate::config::AppConfig;
use crate::driver::adc::{Adc, AdcStub};

/// キャリブレーションのエラー
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalibrationError {
    #[error("ADCが使用できません (pin: {pin})")]
    AdcNotReady { pin: u8 },
    #[error("ADCが無効化されています (pin: {pin})")]
    AdcDisabled { pin: u8 },
    #[error("モデルの学習に失敗しました: {0}")]
    Training(#[from] TrainError),
}

/// 学習データ（入力電圧と目標温度の組）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingSet {
    inputs: Vec<f64>,
    targets: Vec<f64>,
}

impl TrainingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 入力と目標の組を追加
    pub fn push(&mut self, input: f64, target: f64) {
        self.inputs.push(input);
        self.targets.push(target);
    }

    /// ADCの現在の入力電圧と基準温度を1組として記録する
    ///
    /// # 戻り値
    /// 記録した入力電圧（V）
    pub fn sample<A: Adc>(
        &mut self,
        adc: &mut A,
        pin: u8,
        reference_temp: f64,
    ) -> Result<f64, CalibrationError> {
        let voltage = read_ready_voltage(adc, pin)?;
        self.record(voltage, reference_temp);
        Ok(voltage)
    }

    fn record(&mut self, voltage: f64, reference_temp: f64) {
        debug!("サンプル: {:.4} V -> {:.2} °C", voltage, reference_temp);
        self.push(voltage, reference_temp);
    }

    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// 使用可能なADCから入力電圧を1回だけ読み取る
///
/// 無効化されたADCは常に0を返すため、学習データには使用しません。
fn read_ready_voltage<A: Adc>(adc: &mut A, pin: u8) -> Result<f64, CalibrationError> {
    if !adc.is_initialized() || !adc.is_channel_valid(pin) {
        return Err(CalibrationError::AdcNotReady { pin });
    }
    if !adc.is_enabled() {
        return Err(CalibrationError::AdcDisabled { pin });
    }
    Ok(adc.input_voltage(pin))
}

/// ADCスタブの入力値を `step` 刻みで掃引して学習データを作成する
///
/// 各ADC値の入力電圧に `reference` を適用した値を基準温度とします。
/// 掃引後、ADCスタブの値は掃引前の値に戻されます。
pub fn sweep_stub(
    adc: &AdcStub,
    pin: u8,
    step: u16,
    reference: impl Fn(f64) -> f64,
) -> Result<TrainingSet, CalibrationError> {
    let mut set = TrainingSet::new();
    let mut handle = adc.clone();
    let original_value = adc.value();

    for value in (0..=adc.max_value()).step_by(usize::from(step.max(1))) {
        adc.set_value(value);
        match read_ready_voltage(&mut handle, pin) {
            Ok(voltage) => set.record(voltage, reference(voltage)),
            Err(e) => {
                adc.set_value(original_value);
                warn!("学習データの作成を中止しました: {}", e);
                return Err(e);
            }
        }
    }

    adc.set_value(original_value);
    info!("{}件の学習データを作成しました", set.len());
    Ok(set)
}

/// 学習データに対する平均二乗誤差
///
/// 未学習のモデル、または空の学習データでは `None` を返します。
pub fn mean_squared_error<M: LinearRegression>(model: &M, set: &TrainingSet) -> Option<f64> {
    model.mean_squared_error(set.inputs(), set.targets())
}

/// 学習パラメータを保持し、モデルを学習させる
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibrator {
    pub epoch_count: usize,
    pub learning_rate: f64,
}

impl Calibrator {
    pub fn new(epoch_count: usize, learning_rate: f64) -> Self {
        Self {
            epoch_count,
            learning_rate,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.epoch_count, config.learning_rate)
    }

    /// モデルを学習させ、学習後の平均二乗誤差を返す
    pub fn calibrate<M: LinearRegression>(
        &self,
        model: &mut M,
        set: &TrainingSet,
    ) -> Result<f64, CalibrationError> {
        info!(
            "キャリブレーションを開始します ({}件, エポック数: {}, 学習率: {})",
            set.len(),
            self.epoch_count,
            self.learning_rate
        );

        if let Err(e) = model.train(
            set.inputs(),
            set.targets(),
            self.epoch_count,
            self.learning_rate,
        ) {
            warn!("キャリブレーションに失敗しました: {}", e);
            return Err(e.into());
        }

        let mse = mean_squared_error(model, set).unwrap_or(f64::NAN);
        info!("✓ キャリブレーション完了 (MSE: {:.3e})", mse);
        Ok(mse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::tempsensor::tmp36::voltage_to_celsius;
    use lin_reg_core::LinReg;

    #[test]
    fn test_training_set_push() {
        let mut set = TrainingSet::new();
        assert!(set.is_empty());

        set.push(0.5, 0.0);
        set.push(0.75, 25.0);
        assert_eq!(set.len(), 2);
        assert_eq!(set.inputs(), &[0.5, 0.75]);
        assert_eq!(set.targets(), &[0.0, 25.0]);
    }

    #[test]
    fn test_sample_requires_ready_adc() {
        let mut adc = AdcStub::new();
        let mut set = TrainingSet::new();

        adc.set_channel_validity(false);
        assert_eq!(
            set.sample(&mut adc, 2, 20.0),
            Err(CalibrationError::AdcNotReady { pin: 2 })
        );

        adc.set_channel_validity(true);
        adc.set_initialized(false);
        assert!(set.sample(&mut adc, 2, 20.0).is_err());
        assert!(set.is_empty());
    }

    #[test]
    fn test_sweep_stub_restores_value() {
        let adc = AdcStub::new();
        adc.set_value(77);

        let set = sweep_stub(&adc, 0, 31, voltage_to_celsius).unwrap();
        assert_eq!(set.len(), 34);
        assert_eq!(set.inputs()[0], 0.0);
        assert_eq!(set.inputs()[33], 5.0);
        assert_eq!(adc.value(), 77);
    }

    #[test]
    fn test_sample_rejects_disabled_adc() {
        let mut adc = AdcStub::new();
        adc.set_value(500);
        adc.set_enabled(false);
        let mut set = TrainingSet::new();

        assert_eq!(
            set.sample(&mut adc, 0, 25.0),
            Err(CalibrationError::AdcDisabled { pin: 0 })
        );
        assert!(set.is_empty());
    }

    #[test]
    fn test_sweep_disabled_stub_fails() {
        let mut adc = AdcStub::new();
        adc.set_value(77);
        adc.set_enabled(false);

        // 無効なADCは0Vを返すため、-50°Cだけの学習データになってはいけない
        assert_eq!(
            sweep_stub(&adc, 0, 31, voltage_to_celsius),
            Err(CalibrationError::AdcDisabled { pin: 0 })
        );
        assert_eq!(adc.value(), 77);

        adc.set_enabled(true);
        let set = sweep_stub(&adc, 0, 31, voltage_to_celsius).unwrap();
        assert_eq!(set.targets()[0], -50.0);
        assert_eq!(set.targets()[33], 450.0);
    }

    #[test]
    fn test_sweep_pairs_each_voltage_with_its_reference() {
        let adc = AdcStub::new();
        let set = sweep_stub(&adc, 0, 31, voltage_to_celsius).unwrap();

        for (voltage, target) in set.inputs().iter().zip(set.targets()) {
            assert_eq!(*target, voltage_to_celsius(*voltage));
        }
    }

    #[test]
    fn test_mean_squared_error_requires_trained_model() {
        let mut set = TrainingSet::new();
        assert_eq!(mean_squared_error(&LinReg::new(), &set), None);

        set.push(1.0, 50.0);
        assert_eq!(mean_squared_error(&LinReg::new(), &set), None);

        let mut model = LinReg::new();
        model.train(set.inputs(), set.targets(), 1, 0.5).unwrap();
        assert!(mean_squared_error(&model, &set).is_some());
    }

    #[test]
    fn test_calibrate_reports_training_error() {
        let calibrator = Calibrator::new(0, 0.01);
        let mut model = LinReg::new();
        let mut set = TrainingSet::new();
        set.push(1.0, 1.0);

        assert_eq!(
            calibrator.calibrate(&mut model, &set),
            Err(CalibrationError::Training(TrainError::ZeroEpochs))
        );
        assert!(!model.is_trained());
    }

    #[test]
    fn test_calibrate_fits_tmp36_curve() {
        let adc = AdcStub::new();
        let set = sweep_stub(&adc, 0, 31, voltage_to_celsius).unwrap();

        let mut model = LinReg::new();
        let mse = Calibrator::new(5000, 0.01)
            .calibrate(&mut model, &set)
            .unwrap();

        assert!(mse < 1e-6);
        assert!((model.weight().unwrap() - 100.0).abs() < 1e-3);
        assert!((model.bias().unwrap() + 50.0).abs() < 1e-3);
    }
}
