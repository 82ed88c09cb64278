use anyhow::Result;
use nnvector::{Input, Internal, Model, OperationType, Output, Parameter};

fn expect_invalid(model: &Model, needle: &str) {
    let err = model.validate().unwrap_err().to_string();
    assert!(err.contains(needle), "error '{}' does not mention '{}'", err, needle);
}

#[test]
fn empty_model_is_invalid() {
    expect_invalid(&Model::new(), "no operations");
}

#[test]
fn output_shape_must_match_input() -> Result<()> {
    let input = Input::new("op1", "TENSOR_FLOAT32", "{1, 2, 2, 2}")?;
    let output = Output::new("op2", "TENSOR_FLOAT32", "{8}")?;
    let model = Model::new()
        .operation(OperationType::Floor, &[&input])
        .to(&[&output]);
    expect_invalid(&model, "output op2 has shape");
    Ok(())
}

#[test]
fn element_types_must_agree() -> Result<()> {
    let input = Input::new("op1", "TENSOR_FLOAT32", "{2}")?;
    let output = Output::new("op2", "TENSOR_FLOAT16", "{2}")?;
    let model = Model::new()
        .operation(OperationType::Floor, &[&input])
        .to(&[&output]);
    expect_invalid(&model, "mixes");
    Ok(())
}

#[test]
fn unsupported_codes_are_rejected() -> Result<()> {
    let input = Input::new("op1", "TENSOR_INT32", "{2}")?;
    let output = Output::new("op2", "TENSOR_INT32", "{2}")?;
    let model = Model::new()
        .operation(OperationType::Floor, &[&input])
        .to(&[&output]);
    expect_invalid(&model, "does not support TENSOR_INT32");
    Ok(())
}

#[test]
fn arity_is_checked() -> Result<()> {
    let a = Input::new("a", "TENSOR_FLOAT32", "{2}")?;
    let b = Input::new("b", "TENSOR_FLOAT32", "{2}")?;
    let out = Output::new("out", "TENSOR_FLOAT32", "{2}")?;
    let model = Model::new()
        .operation(OperationType::Add, &[&a, &b])
        .to(&[&out]);
    expect_invalid(&model, "expects 3 inputs");
    Ok(())
}

#[test]
fn fused_activation_must_be_int32() -> Result<()> {
    let a = Input::new("a", "TENSOR_FLOAT32", "{2}")?;
    let b = Input::new("b", "TENSOR_FLOAT32", "{2}")?;
    let act = Parameter::new("act", "FLOAT32", "{}", &[0.0])?;
    let out = Output::new("out", "TENSOR_FLOAT32", "{2}")?;
    let model = Model::new()
        .operation(OperationType::Add, &[&a, &b, &act])
        .to(&[&out]);
    expect_invalid(&model, "must be INT32");
    Ok(())
}

#[test]
fn inputs_cannot_be_written() -> Result<()> {
    let a = Input::new("a", "TENSOR_FLOAT32", "{2}")?;
    let b = Input::new("b", "TENSOR_FLOAT32", "{2}")?;
    let model = Model::new().operation(OperationType::Floor, &[&a]).to(&[&b]);
    expect_invalid(&model, "writes Input operand b");
    Ok(())
}

#[test]
fn internal_operand_must_be_produced_before_use() -> Result<()> {
    let mid = Internal::new("mid", "TENSOR_FLOAT32", "{2}")?;
    let out = Output::new("out", "TENSOR_FLOAT32", "{2}")?;
    let model = Model::new().operation(OperationType::Floor, &[&mid]).to(&[&out]);
    expect_invalid(&model, "reads mid before it is produced");
    Ok(())
}

#[test]
fn outputs_are_produced_once() -> Result<()> {
    let a = Input::new("a", "TENSOR_FLOAT32", "{2}")?;
    let out = Output::new("out", "TENSOR_FLOAT32", "{2}")?;
    let model = Model::new()
        .operation(OperationType::Floor, &[&a])
        .to(&[&out])
        .operation(OperationType::Neg, &[&a])
        .to(&[&out]);
    expect_invalid(&model, "produced twice");
    Ok(())
}

#[test]
fn conflicting_operand_names_are_rejected() -> Result<()> {
    let a = Input::new("a", "TENSOR_FLOAT32", "{2}")?;
    let a_wide = Input::new("a", "TENSOR_FLOAT32", "{4}")?;
    let out = Output::new("out", "TENSOR_FLOAT32", "{2}")?;
    let b = Input::new("b", "TENSOR_FLOAT32", "{2}")?;
    let act = Parameter::new("act", "INT32", "{}", &[0.0])?;
    let model = Model::new()
        .operation(OperationType::Add, &[&a, &a_wide, &act])
        .to(&[&out]);
    expect_invalid(&model, "declared twice");
    let ok = Model::new()
        .operation(OperationType::Add, &[&a, &b, &act])
        .to(&[&out]);
    ok.validate()?;
    Ok(())
}
