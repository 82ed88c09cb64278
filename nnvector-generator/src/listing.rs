//! Generated Rust test listings.
//!
//! A listing rebuilds the case through the builder API: a model constructor
//! laid out in three phases (operands, operations, inputs and outputs), an
//! `is_ignored` predicate and the example table.
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use nnvector::{Model, OperandRole, TensorValue, TestCase};

use crate::vectors::write_file;

/// Render `case` as a Rust module.
pub fn render_test_module(case: &TestCase) -> Result<String> {
    let model = case.model();
    let mut out = String::new();
    writeln!(out, "// Generated by build_vectors from the {} declaration.", case.name())?;
    writeln!(out, "use anyhow::Result;")?;
    writeln!(
        out,
        "use nnvector::{{values, {}Model, OperationType, TestCase}};",
        role_imports(model)
    )?;
    writeln!(out)?;

    writeln!(out, "pub fn create_model() -> Result<Model> {{")?;
    writeln!(out, "    // Phase 1, operands")?;
    for (index, operand) in model.operands().iter().enumerate() {
        let mut args = format!(
            "\"{}\", \"{}\", \"{}\"",
            operand.name,
            operand.code(),
            operand.ty.shape_literal()
        );
        if operand.role == OperandRole::Parameter {
            let value = operand
                .constant()?
                .ok_or_else(|| anyhow!("parameter {} has no value", operand.name))?;
            write!(args, ", &[{}]", parameter_literals(&value).join(", "))?;
        }
        writeln!(
            out,
            "    let o{} = {}::new({})?;",
            index,
            operand.role.as_str(),
            args
        )?;
    }
    writeln!(out, "    // Phase 2, operations")?;
    writeln!(out, "    let model = Model::new()")?;
    for operation in model.operations() {
        let inputs: Vec<String> = operation.inputs.iter().map(|i| format!("&o{}", i)).collect();
        let outputs: Vec<String> = operation.outputs.iter().map(|i| format!("&o{}", i)).collect();
        writeln!(
            out,
            "        .operation(OperationType::{:?}, &[{}])",
            operation.op,
            inputs.join(", ")
        )?;
        writeln!(out, "        .to(&[{}])", outputs.join(", "))?;
    }
    writeln!(out, "        .relaxed_execution({});", model.is_relaxed())?;
    writeln!(out, "    // Phase 3, inputs and outputs")?;
    let inputs: Vec<String> = model.inputs().iter().map(|i| format!("o{}", i)).collect();
    let outputs: Vec<String> = model.outputs().iter().map(|i| format!("o{}", i)).collect();
    writeln!(out, "    // inputs: [{}]", inputs.join(", "))?;
    writeln!(out, "    // outputs: [{}]", outputs.join(", "))?;
    writeln!(out, "    Ok(model)")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    let ignored: Vec<String> = case.ignored().map(|i| i.to_string()).collect();
    writeln!(out, "pub fn is_ignored(i: usize) -> bool {{")?;
    writeln!(out, "    const IGNORE: &[usize] = &[{}];", ignored.join(", "))?;
    writeln!(out, "    IGNORE.contains(&i)")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "pub fn create_case() -> Result<TestCase> {{")?;
    writeln!(out, "    let model = create_model()?;")?;
    for index in model.inputs().into_iter().chain(model.outputs()) {
        writeln!(out, "    let o{} = model.operand({})?.clone();", index, index)?;
    }
    writeln!(out, "    let mut case = TestCase::new(\"{}\", model);", case.name())?;
    for (idx, example) in case.examples().iter().enumerate() {
        writeln!(out, "    // Example {}", idx)?;
        writeln!(out, "    case.example(")?;
        writeln!(out, "        values! {{ {} }},", feed(model, &example.inputs)?)?;
        writeln!(out, "        values! {{ {} }},", feed(model, &example.outputs)?)?;
        writeln!(out, "    )?;")?;
    }
    writeln!(out, "    for index in 0..case.examples().len() {{")?;
    writeln!(out, "        if is_ignored(index) {{")?;
    writeln!(out, "            case.ignore(index);")?;
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")?;
    writeln!(out, "    Ok(case)")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "pub fn create_case_dynamic_output_shape() -> Result<TestCase> {{")?;
    writeln!(out, "    create_case()?.dynamic_output_shape()")?;
    writeln!(out, "}}")?;
    Ok(out)
}

/// Write the listing for `case` to `<dir>/<name>.rs`.
pub fn write_listing(dir: &Path, case: &TestCase) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .map_err(|err| anyhow!("failed to create {}: {}", dir.display(), err))?;
    let path = dir.join(format!("{}.rs", case.name()));
    write_file(&path, &render_test_module(case)?)?;
    Ok(path)
}

fn role_imports(model: &Model) -> String {
    let mut roles: Vec<&str> = model
        .operands()
        .iter()
        .map(|operand| operand.role.as_str())
        .collect();
    roles.sort_unstable();
    roles.dedup();
    roles.iter().map(|role| format!("{}, ", role)).collect()
}

fn feed(model: &Model, side: &nnvector::ExampleSide) -> Result<String> {
    let mut entries = Vec::new();
    for (index, value) in side.iter() {
        let operand = model.operand(index)?;
        if value.shape() != operand.ty.shape().as_slice() {
            return Err(anyhow!(
                "listing needs declared dims for {}, example has {:?}",
                operand.name,
                value.shape()
            ));
        }
        entries.push(format!("o{} => [{}]", index, rust_literals(value).join(", ")));
    }
    Ok(entries.join(", "))
}

fn parameter_literals(value: &TensorValue) -> Vec<String> {
    if value.dtype().is_float() {
        return rust_literals(value);
    }
    value
        .to_f64_vec()
        .into_iter()
        .map(|number| format!("{:?}", number))
        .collect()
}

fn rust_literals(value: &TensorValue) -> Vec<String> {
    match value {
        TensorValue::F32(_) | TensorValue::F16(_) => value
            .to_f64_vec()
            .into_iter()
            .zip(value.to_literals())
            .map(|(number, text)| {
                if number.is_nan() {
                    "f64::NAN".to_string()
                } else if number == f64::INFINITY {
                    "f64::INFINITY".to_string()
                } else if number == f64::NEG_INFINITY {
                    "f64::NEG_INFINITY".to_string()
                } else {
                    text
                }
            })
            .collect(),
        _ => value
            .to_f64_vec()
            .into_iter()
            .map(|number| format!("{}", number as i64))
            .collect(),
    }
}
