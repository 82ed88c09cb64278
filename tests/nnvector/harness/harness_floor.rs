use anyhow::Result;
use nnvector::specs::{self, catalog};
use nnvector::{numel, values, DType, Device, Harness, HarnessConfig, OperationType, TestCase};

use crate::common;

#[test]
fn floor_relaxed_passes_on_targets() -> Result<()> {
    let case = specs::find("floor_relaxed")?;
    for device in common::test_targets() {
        let report = Harness::for_device(device).run_case(&case)?.into_result()?;
        assert_eq!(report.examples.len(), 1);
        assert_eq!(report.backend, device.as_str());
    }
    Ok(())
}

#[test]
fn relaxed_floor_expectations_hold_near_integers() -> Result<()> {
    let (model, input, output) = common::unary_model(OperationType::Floor, "{3}", true)?;
    let mut case = TestCase::new("floor_near_integers", model);
    case.example(
        values! { input => [0.9999, 10.9999, -0.0001] },
        values! { output => [0.0, 10.0, -1.0] },
    )?;
    let report = Harness::for_device(Device::Reference).run_case(&case)?;
    assert_eq!(report.backend, "reference");
    report.into_result()?;
    Ok(())
}

#[test]
fn floor_relaxed_declaration_shape() -> Result<()> {
    let case = specs::find("floor_relaxed")?;
    let model = case.model();
    assert!(model.is_relaxed());
    assert_eq!(model.operands().len(), 2);
    assert_eq!(model.operations().len(), 1);
    assert_eq!(model.inputs(), vec![0]);
    assert_eq!(model.outputs(), vec![1]);

    let example = &case.examples()[0];
    let input = example.inputs.get(0).ok_or_else(|| anyhow::anyhow!("no input"))?;
    let output = example.outputs.get(1).ok_or_else(|| anyhow::anyhow!("no output"))?;
    assert_eq!(input.shape(), &[1, 2, 2, 2]);
    assert_eq!(input.len(), numel(input.shape()));
    assert_eq!(output.len(), 8);
    assert_eq!(example.inputs.bucket(DType::F32).count(), 1);
    assert_eq!(example.inputs.bucket(DType::I32).count(), 0);

    let inputs = input.as_tensor::<f32>()?;
    let outputs = output.as_tensor::<f32>()?;
    for (x, y) in inputs.data.iter().zip(outputs.data.iter()) {
        assert_eq!(x.floor(), *y);
    }
    Ok(())
}

#[test]
fn catalog_builds_fresh_cases() -> Result<()> {
    let first = specs::find("floor_relaxed")?;
    let second = specs::find("floor_relaxed")?;
    assert_eq!(first, second);
    assert_eq!(first.examples().len(), 1);
    let names: Vec<&str> = catalog().iter().map(|entry| entry.name).collect();
    assert!(names.contains(&"floor_relaxed"));
    assert!(specs::find("no_such_case").is_err());
    Ok(())
}

#[test]
fn run_all_covers_every_catalog_case() -> Result<()> {
    let cases = specs::build_all()?;
    for device in common::test_targets() {
        let harness = Harness::for_device(device).with_config(HarnessConfig {
            dynamic_output_shape: true,
            ..HarnessConfig::default()
        });
        let reports = harness.run_all(&cases)?;
        assert_eq!(reports.len(), cases.len() * 2);
        for report in reports {
            report.into_result()?;
        }
    }
    Ok(())
}
