// Generated by build_vectors from the floor_relaxed declaration.
use anyhow::Result;
use nnvector::{values, Input, Output, Model, OperationType, TestCase};

pub fn create_model() -> Result<Model> {
    // Phase 1, operands
    let o0 = Input::new("op1", "TENSOR_FLOAT32", "{1, 2, 2, 2}")?;
    let o1 = Output::new("op2", "TENSOR_FLOAT32", "{1, 2, 2, 2}")?;
    // Phase 2, operations
    let model = Model::new()
        .operation(OperationType::Floor, &[&o0])
        .to(&[&o1])
        .relaxed_execution(true);
    // Phase 3, inputs and outputs
    // inputs: [o0]
    // outputs: [o1]
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
    let mut case = TestCase::new("floor_relaxed", model);
    // Example 0
    case.example(
        values! { o0 => [-1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 10.2] },
        values! { o1 => [-2.0, -1.0, -1.0, 0.0, 0.0, 1.0, 1.0, 10.0] },
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
