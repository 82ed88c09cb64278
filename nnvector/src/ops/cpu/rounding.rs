use anyhow::Result;

use crate::ops::Precision;
use crate::tensor::TensorValue;

use super::elementwise::unary_float;

/// Largest integer not greater than each element (round toward -inf).
///
/// Integral results are exact, so relaxed models floor the float32 input
/// directly.
pub fn floor(inputs: &[TensorValue], _precision: Precision) -> Result<TensorValue> {
    unary_float(&inputs[0], Precision::Full, f32::floor)
}
