use anyhow::Result;
use nnvector::{
    round_to_f16, Backend, Executor, Input, Model, OperationType, Output, Precision, Random,
    ReferenceBackend, Tensor, TensorValue,
};

use crate::common;

#[test]
fn floor_boundary_values() -> Result<()> {
    let (model, input, _) = common::unary_model(OperationType::Floor, "{7}", false)?;
    let data = vec![-1.5f32, -0.5, -0.0, 0.0, 0.5, 10.2, -10.2];
    for device in common::test_targets() {
        let backend = common::backend(device);
        let out = common::run_single(
            backend.as_ref(),
            &model,
            &input,
            Tensor::from_vec(data.clone()).into(),
        )?;
        let got = common::f32_data(&out)?;
        assert_eq!(got, vec![-2.0, -1.0, -0.0, 0.0, 0.0, 10.0, -11.0]);
        assert!(got[2].is_sign_negative());
    }
    Ok(())
}

#[test]
fn floor_matches_f32_floor_on_random_inputs() -> Result<()> {
    let (model, input, _) = common::unary_model(OperationType::Floor, "{4, 64}", false)?;
    let mut random = Random::<f32>::with_seed(17);
    let backend = ReferenceBackend::strict();
    for _ in 0..8 {
        let tensor = random.next((-100.0, 100.0), vec![4, 64])?;
        let expected: Vec<f32> = tensor.data.iter().map(|v| v.floor()).collect();
        let out = common::run_single(&backend, &model, &input, tensor.into())?;
        assert_eq!(common::f32_data(&out)?, expected);
    }
    Ok(())
}

#[test]
fn relaxed_floor_is_exact() -> Result<()> {
    let (model, input, _) = common::unary_model(OperationType::Floor, "{256}", true)?;
    let tensor = Random::<f32>::generate_with_seed(3, (-50.0, 50.0), vec![256])?;
    let expected: Vec<f32> = tensor.data.iter().map(|v| v.floor()).collect();
    let backend = ReferenceBackend::new();
    let out = common::run_single(&backend, &model, &input, tensor.into())?;
    assert_eq!(common::f32_data(&out)?, expected);
    Ok(())
}

#[test]
fn relaxed_floor_keeps_values_near_integers() -> Result<()> {
    let (model, input, _) = common::unary_model(OperationType::Floor, "{4}", true)?;
    let data = vec![0.9999f32, 10.9999, -0.0001, 2047.5];
    assert_eq!(round_to_f16(0.9999), 1.0);
    let backend = ReferenceBackend::new();
    let out = common::run_single(&backend, &model, &input, Tensor::from_vec(data).into())?;
    assert_eq!(common::f32_data(&out)?, vec![0.0, 10.0, -1.0, 2047.0]);
    Ok(())
}

#[test]
fn floor_keeps_special_values() -> Result<()> {
    let (model, input, _) = common::unary_model(OperationType::Floor, "{3}", false)?;
    let backend = ReferenceBackend::strict();
    let value = TensorValue::from(Tensor::from_vec(vec![f32::INFINITY, f32::NEG_INFINITY, f32::NAN]));
    let out = common::run_single(&backend, &model, &input, value)?;
    let got = common::f32_data(&out)?;
    assert_eq!(got[0], f32::INFINITY);
    assert_eq!(got[1], f32::NEG_INFINITY);
    assert!(got[2].is_nan());
    assert_eq!(backend.name(), "reference-strict");
    Ok(())
}

#[test]
fn executor_reports_missing_kernel() -> Result<()> {
    let input = Input::new("input", "TENSOR_INT32", "{2}")?;
    let output = Output::new("output", "TENSOR_INT32", "{2}")?;
    let model = Model::new()
        .operation(OperationType::Floor, &[&input])
        .to(&[&output]);
    assert!(model.validate().is_err());

    let mut executor = Executor::new(&model, Precision::Full);
    executor.insert(0, Tensor::from_vec(vec![1i32, -2]).into())?;
    let err = executor.run().unwrap_err();
    assert!(err.to_string().contains("no reference kernel for int32"));
    Ok(())
}
