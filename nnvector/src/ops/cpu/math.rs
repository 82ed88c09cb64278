use anyhow::Result;

use crate::ops::Precision;
use crate::tensor::TensorValue;

use super::elementwise::{binary_float, unary_float, unary_signed};

pub fn abs(inputs: &[TensorValue], precision: Precision) -> Result<TensorValue> {
    unary_signed(&inputs[0], precision, f32::abs, i32::wrapping_abs)
}

pub fn neg(inputs: &[TensorValue], precision: Precision) -> Result<TensorValue> {
    unary_signed(&inputs[0], precision, |v| -v, i32::wrapping_neg)
}

pub fn exp(inputs: &[TensorValue], precision: Precision) -> Result<TensorValue> {
    unary_float(&inputs[0], precision, f32::exp)
}

pub fn sqrt(inputs: &[TensorValue], precision: Precision) -> Result<TensorValue> {
    unary_float(&inputs[0], precision, f32::sqrt)
}

pub fn add(inputs: &[TensorValue], precision: Precision) -> Result<TensorValue> {
    binary_float(&inputs[0], &inputs[1], &inputs[2], precision, |a, b| a + b)
}

pub fn mul(inputs: &[TensorValue], precision: Precision) -> Result<TensorValue> {
    binary_float(&inputs[0], &inputs[1], &inputs[2], precision, |a, b| a * b)
}

pub fn sub(inputs: &[TensorValue], precision: Precision) -> Result<TensorValue> {
    binary_float(&inputs[0], &inputs[1], &inputs[2], precision, |a, b| a - b)
}

pub fn div(inputs: &[TensorValue], precision: Precision) -> Result<TensorValue> {
    binary_float(&inputs[0], &inputs[1], &inputs[2], precision, |a, b| a / b)
}
