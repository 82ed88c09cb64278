use anyhow::Result;

use crate::example::TestCase;
use crate::graph::{Input, Model, OperationType, Output};
use crate::try_example;

pub fn build() -> Result<TestCase> {
    let i1 = Input::new("op1", "TENSOR_FLOAT32", "{1, 2, 2, 2}")?;
    let i2 = Output::new("op2", "TENSOR_FLOAT32", "{1, 2, 2, 2}")?;
    let model = Model::new().operation(OperationType::Floor, &[&i1]).to(&[&i2]);

    let mut case = TestCase::new("floor", model);
    try_example!(case, {
        i1 => [-1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 10.2]
    } => {
        i2 => [-2.0, -1.0, -1.0, 0.0, 0.0, 1.0, 1.0, 10]
    })?;
    Ok(case)
}
