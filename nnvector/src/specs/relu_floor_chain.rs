use anyhow::Result;

use crate::example::TestCase;
use crate::graph::{Input, Internal, Model, OperationType, Output};
use crate::try_example;

/// RELU feeding FLOOR through an internal operand.
pub fn build() -> Result<TestCase> {
    let input = Input::new("input", "TENSOR_FLOAT32", "{2, 3}")?;
    let rectified = Internal::new("rectified", "TENSOR_FLOAT32", "{2, 3}")?;
    let output = Output::new("output", "TENSOR_FLOAT32", "{2, 3}")?;
    let model = Model::new()
        .operation(OperationType::Relu, &[&input])
        .to(&[&rectified])
        .operation(OperationType::Floor, &[&rectified])
        .to(&[&output]);

    let mut case = TestCase::new("relu_floor_chain", model);
    try_example!(case, {
        input => [-3.5, -0.25, 0.0, 0.75, 2.5, 7.9]
    } => {
        output => [0.0, 0.0, 0.0, 0.0, 2.0, 7.0]
    })?;
    Ok(case)
}
