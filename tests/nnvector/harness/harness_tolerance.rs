use anyhow::Result;
use nnvector::{
    values, Device, Harness, HarnessConfig, Input, Mismatch, Model, Operand, OperationType,
    Output, Parameter, TestCase, Tolerance,
};

struct PrecisionCase {
    case: TestCase,
    a: Operand,
    b: Operand,
    out: Operand,
}

fn precision_case(relaxed: bool) -> Result<PrecisionCase> {
    let a = Input::new("a", "TENSOR_FLOAT32", "{2}")?;
    let b = Input::new("b", "TENSOR_FLOAT32", "{2}")?;
    let act = Parameter::new("act", "INT32", "{}", &[0.0])?;
    let out = Output::new("out", "TENSOR_FLOAT32", "{2}")?;
    let model = Model::new()
        .operation(OperationType::Mul, &[&a, &b, &act])
        .to(&[&out])
        .relaxed_execution(relaxed);
    let mut case = TestCase::new("mul_precision", model);
    case.example(
        values! { a => [1.0001, 3.0], b => [1.0, 1.0] },
        values! { out => [1.0001, 3.0] },
    )?;
    Ok(PrecisionCase { case, a, b, out })
}

#[test]
fn relaxed_tolerance_accepts_what_strict_rejects() {
    let expected = 1.0001;
    let actual = 1.0;
    assert!(Tolerance::RELAXED.accepts(expected, actual));
    assert!(!Tolerance::FLOAT32.accepts(expected, actual));
    assert!(Tolerance::QUANT8.accepts(10.0, 11.0));
    assert!(!Tolerance::QUANT8.accepts(10.0, 12.0));
    assert!(!Tolerance::EXACT.accepts(3.0, 4.0));
    assert!(Tolerance::EXACT.accepts(f64::NAN, f64::NAN));
    assert!(!Tolerance::FLOAT32.accepts(1.0, f64::NAN));
}

#[test]
fn relaxed_model_passes_at_half_precision() -> Result<()> {
    let case = precision_case(true)?.case;
    Harness::for_device(Device::Reference).run_case(&case)?.into_result()?;
    Harness::for_device(Device::ReferenceStrict).run_case(&case)?.into_result()?;
    Ok(())
}

#[test]
fn strict_override_reports_value_mismatch() -> Result<()> {
    let case = precision_case(true)?.case;
    let harness = Harness::for_device(Device::Reference).with_config(HarnessConfig {
        float_tolerance: Some(Tolerance::FLOAT32),
        ..HarnessConfig::default()
    });
    let report = harness.run_case(&case)?;
    assert!(!report.passed());
    let mismatches: Vec<&Mismatch> = report.mismatches().collect();
    assert_eq!(mismatches.len(), 1);
    match mismatches[0] {
        Mismatch::Value {
            operand,
            index,
            actual,
            ..
        } => {
            assert_eq!(operand, "out");
            assert_eq!(*index, 0);
            assert_eq!(*actual, 1.0);
        }
        other => panic!("unexpected mismatch {}", other),
    }
    let err = report.into_result().unwrap_err();
    assert!(err.to_string().contains("mul_precision failed on reference"));
    Ok(())
}

#[test]
fn non_relaxed_model_uses_strict_tolerance() -> Result<()> {
    let PrecisionCase { mut case, a, b, out } = precision_case(false)?;
    case.example(
        values! { a => [2.0, 2.0], b => [0.5, 0.25] },
        values! { out => [1.001, 0.5] },
    )?;
    let report = Harness::for_device(Device::Reference).run_case(&case)?;
    assert!(report.examples[0].passed());
    assert!(!report.examples[1].passed());
    Ok(())
}
