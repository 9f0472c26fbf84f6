/// 浮動小数点値を最も近い整数に丸めて `i16` に変換する
///
/// 0.5 ちょうどの場合は0から遠い方向に丸めます（`f64::round` と同じ）。
/// `i16` の範囲外の値は飽和し、NaN は0になります。
pub fn round_to_i16(value: f64) -> i16 {
    value.round() as i16
}
