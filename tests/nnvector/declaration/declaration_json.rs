use anyhow::Result;
use nnvector::specs;
use nnvector::{values, CaseDeserialize, CaseSerialize, ExampleSide, OperationType, TestCase};

use crate::common::unary_model;

fn literals(side: &ExampleSide) -> Vec<(usize, Vec<String>)> {
    side.iter()
        .map(|(index, value)| (index, value.to_literals()))
        .collect()
}

#[test]
fn json_round_trip_keeps_case() -> Result<()> {
    for case in specs::build_all()? {
        let value = CaseSerialize::json(&case)?;
        assert_eq!(CaseDeserialize::from_json(value)?, case);
        let text = CaseSerialize::pretty(&case)?;
        assert_eq!(CaseDeserialize::from_text(&text)?, case);
    }
    Ok(())
}

#[test]
fn json_layout_names_codes_and_ops() -> Result<()> {
    let value = CaseSerialize::json(&specs::find("floor_relaxed")?)?;
    assert_eq!(value["name"], "floor_relaxed");
    assert_eq!(value["model"]["relaxed"], true);
    assert_eq!(value["model"]["operations"][0]["op"], "FLOOR");
    assert_eq!(value["model"]["operands"][0]["ty"]["code"], "TENSOR_FLOAT32");
    assert_eq!(value["model"]["operands"][1]["role"], "output");
    Ok(())
}

#[test]
fn json_keeps_non_finite_floats() -> Result<()> {
    let (model, input, output) = unary_model(OperationType::Floor, "{4}", false)?;
    let mut case = TestCase::new("floor_non_finite", model);
    case.example(
        values! { input => [f64::INFINITY, f64::NEG_INFINITY, f64::NAN, -0.0] },
        values! { output => [f64::INFINITY, f64::NEG_INFINITY, f64::NAN, -0.0] },
    )?;

    let value = CaseSerialize::json(&case)?;
    let stored = &value["examples"][0]["inputs"];
    assert!(!stored.to_string().contains("null"));

    let text = CaseSerialize::pretty(&case)?;
    let back = CaseDeserialize::from_text(&text)?;
    assert_eq!(back.model(), case.model());
    let before = &case.examples()[0];
    let after = &back.examples()[0];
    assert_eq!(literals(&after.inputs), literals(&before.inputs));
    assert_eq!(literals(&after.outputs), literals(&before.outputs));
    assert_eq!(
        literals(&after.inputs)[0].1,
        vec!["inf", "-inf", "NaN", "-0.0"]
    );
    Ok(())
}

#[test]
fn malformed_json_is_an_error() {
    assert!(CaseDeserialize::from_text("{\"name\": 3}").is_err());
}
