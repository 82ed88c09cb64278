use anyhow::Result;

use crate::example::TestCase;
use crate::graph::{Input, Model, OperationType, Output, Parameter};
use crate::try_example;

/// Broadcast MUL with no fused activation.
pub fn build() -> Result<TestCase> {
    let op1 = Input::new("op1", "TENSOR_FLOAT32", "{2, 2}")?;
    let op2 = Input::new("op2", "TENSOR_FLOAT32", "{2}")?;
    let act = Parameter::new("act", "INT32", "{}", &[0.0])?;
    let op3 = Output::new("op3", "TENSOR_FLOAT32", "{2, 2}")?;
    let model = Model::new()
        .operation(OperationType::Mul, &[&op1, &op2, &act])
        .to(&[&op3]);

    let mut case = TestCase::new("mul", model);
    try_example!(case, {
        op1 => [1.0, 2.0, -3.0, 4.5],
        op2 => [2.0, -0.5]
    } => {
        op3 => [2.0, -1.0, -6.0, -2.25]
    })?;
    try_example!(case, {
        op1 => [0.0, -1.25, 8.0, 0.5],
        op2 => [4.0, 4.0]
    } => {
        op3 => [0.0, -5.0, 32.0, 2.0]
    })?;
    Ok(case)
}
