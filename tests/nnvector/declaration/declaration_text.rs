use anyhow::Result;
use nnvector::specs::{self, catalog};
use nnvector::{DeclarationParser, DeclarationWriter, Device, Harness};

const FLOOR_RELAXED: &str = r#"
# model
model = Model()
i1 = Input("op1", "TENSOR_FLOAT32", "{1, 2, 2, 2}")
i2 = Output("op2", "TENSOR_FLOAT32", "{1, 2, 2, 2}")
model = model.Operation("FLOOR", i1).To(i2)
model = model.RelaxedExecution(True)

# Example 1. Input in operand 0,
input0 = {i1: # input 0
          [-1.5, -1.0, -0.5, 0.0,
            .5,   1.0,  1.5, 10.2]}

output0 = {i2: # output 0
           [-2.0, -1.0, -1.0, 0.0,
             0.0,  1.0,  1.0, 10]}

# Instantiate an example
Example((input0, output0))
"#;

#[test]
fn parses_handwritten_declaration() -> Result<()> {
    let parsed = DeclarationParser::parse("floor_relaxed", FLOOR_RELAXED)?;
    let built = specs::find("floor_relaxed")?;
    assert_eq!(parsed, built);
    let input = parsed.examples()[0]
        .inputs
        .get(0)
        .ok_or_else(|| anyhow::anyhow!("no input"))?;
    assert_eq!(input.as_tensor::<f32>()?.data[4], 0.5);
    Harness::for_device(Device::Reference)
        .run_case(&parsed)?
        .into_result()?;
    Ok(())
}

#[test]
fn writer_output_reparses_identically() -> Result<()> {
    for entry in catalog() {
        let case = (entry.build)()?;
        let text = DeclarationWriter::write(&case)?;
        let parsed = DeclarationParser::parse(case.name(), &text)?;
        assert_eq!(parsed, case, "round trip changed {}", case.name());
        assert_eq!(DeclarationWriter::write(&parsed)?, text);
    }
    Ok(())
}

#[test]
fn writer_emits_relaxed_flag_and_examples() -> Result<()> {
    let text = DeclarationWriter::write(&specs::find("floor_relaxed")?)?;
    assert!(text.contains("o0 = Input(\"op1\", \"TENSOR_FLOAT32\", \"{1, 2, 2, 2}\")"));
    assert!(text.contains("model = model.Operation(\"FLOOR\", o0).To(o1)"));
    assert!(text.contains("model = model.RelaxedExecution(True)"));
    assert!(text.contains("Example((input0, output0))"));

    let strict = DeclarationWriter::write(&specs::find("floor")?)?;
    assert!(!strict.contains("RelaxedExecution"));
    Ok(())
}

#[test]
fn ignored_examples_and_dynamic_dims_round_trip() -> Result<()> {
    let mut case = specs::find("mul")?;
    case.ignore(1);
    let dynamic = case.dynamic_output_shape()?;
    let text = DeclarationWriter::write(&dynamic)?;
    assert!(text.contains("IgnoreExample(1)"));
    assert!(text.contains("\"{0, 0}\""));
    assert!(text.contains("(\"{2, 2}\", ["));
    let parsed = DeclarationParser::parse(dynamic.name(), &text)?;
    assert_eq!(parsed, dynamic);
    assert!(parsed.is_ignored(1));
    Ok(())
}

#[test]
fn parse_errors_carry_line_numbers() {
    let source = "model = Model()\ni1 = Input(\"op1\", \"TENSOR_FLOAT32\" \"{2}\")\n";
    let err = DeclarationParser::parse("broken", source).unwrap_err();
    assert!(err.to_string().starts_with("line 2:"), "{}", err);

    let unknown = "model = Model()\nmodel = model.Operation(\"FLOOR\", x).To(y)\n";
    let err = DeclarationParser::parse("broken", unknown).unwrap_err();
    assert!(err.to_string().contains("unknown operand x"), "{}", err);

    assert!(DeclarationParser::parse("empty", "# nothing here\n").is_err());
}
