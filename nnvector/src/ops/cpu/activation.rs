use anyhow::{anyhow, Result};

use crate::ops::Precision;
use crate::tensor::TensorValue;

use super::elementwise::{unary_float, unary_signed};

/// Activation selected by the trailing INT32 operand of binary ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FusedActivation {
    None,
    Relu,
    Relu1,
    Relu6,
}

impl FusedActivation {
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(FusedActivation::None),
            1 => Ok(FusedActivation::Relu),
            2 => Ok(FusedActivation::Relu1),
            3 => Ok(FusedActivation::Relu6),
            other => Err(anyhow!("unknown fused activation code {}", other)),
        }
    }

    pub fn from_value(value: &TensorValue) -> Result<Self> {
        let tensor = value.as_tensor::<i32>()?;
        match tensor.data.as_slice() {
            [code] => Self::from_code(*code),
            _ => Err(anyhow!(
                "fused activation must be a single INT32, got {} values",
                tensor.len()
            )),
        }
    }

    pub fn apply(self, value: f32) -> f32 {
        match self {
            FusedActivation::None => value,
            FusedActivation::Relu => value.max(0.0),
            FusedActivation::Relu1 => value.clamp(-1.0, 1.0),
            FusedActivation::Relu6 => value.clamp(0.0, 6.0),
        }
    }
}

pub fn relu(inputs: &[TensorValue], precision: Precision) -> Result<TensorValue> {
    unary_signed(&inputs[0], precision, |v| v.max(0.0), |v| v.max(0))
}

pub fn relu1(inputs: &[TensorValue], precision: Precision) -> Result<TensorValue> {
    unary_signed(
        &inputs[0],
        precision,
        |v| v.clamp(-1.0, 1.0),
        |v| v.clamp(-1, 1),
    )
}

pub fn relu6(inputs: &[TensorValue], precision: Precision) -> Result<TensorValue> {
    unary_signed(&inputs[0], precision, |v| v.clamp(0.0, 6.0), |v| v.clamp(0, 6))
}

pub fn logistic(inputs: &[TensorValue], precision: Precision) -> Result<TensorValue> {
    unary_float(&inputs[0], precision, |v| 1.0 / (1.0 + (-v).exp()))
}

pub fn tanh(inputs: &[TensorValue], precision: Precision) -> Result<TensorValue> {
    unary_float(&inputs[0], precision, f32::tanh)
}
