// Generated by build_vectors from the mul declaration.
use anyhow::Result;
use nnvector::{values, Input, Output, Parameter, Model, OperationType, TestCase};

pub fn create_model() -> Result<Model> {
    // Phase 1, operands
    let o0 = Input::new("op1", "TENSOR_FLOAT32", "{2, 2}")?;
    let o1 = Input::new("op2", "TENSOR_FLOAT32", "{2}")?;
    let o2 = Parameter::new("act", "INT32", "{}", &[0.0])?;
    let o3 = Output::new("op3", "TENSOR_FLOAT32", "{2, 2}")?;
    // Phase 2, operations
    let model = Model::new()
        .operation(OperationType::Mul, &[&o0, &o1, &o2])
        .to(&[&o3])
        .relaxed_execution(false);
    // Phase 3, inputs and outputs
    // inputs: [o0, o1]
    // outputs: [o3]
    Ok(model)
}

pub fn is_ignored(i: usize) -> bool {
    const IGNORE: &[usize] = &[];
    IGNORE.contains(&i)
}

pub fn create_case() -> Result<TestCase> {
    let model = create_model()?;
    let o0 = model.operand(0)?.clone();
    let o1 = model.operand(1)?.clone();
    let o3 = model.operand(3)?.clone();
    let mut case = TestCase::new("mul", model);
    // Example 0
    case.example(
        values! { o0 => [1.0, 2.0, -3.0, 4.5], o1 => [2.0, -0.5] },
        values! { o3 => [2.0, -1.0, -6.0, -2.25] },
    )?;
    // Example 1
    case.example(
        values! { o0 => [0.0, -1.25, 8.0, 0.5], o1 => [4.0, 4.0] },
        values! { o3 => [0.0, -5.0, 32.0, 2.0] },
    )?;
    for index in 0..case.examples().len() {
        if is_ignored(index) {
            case.ignore(index);
        }
    }
    Ok(case)
}

pub fn create_case_dynamic_output_shape() -> Result<TestCase> {
    create_case()?.dynamic_output_shape()
}
