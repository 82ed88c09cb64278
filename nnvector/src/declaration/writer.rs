use std::fmt::Write as _;

use anyhow::Result;

use crate::example::{ExampleSide, TestCase};
use crate::graph::{Model, OperandRole};

pub struct DeclarationWriter;

impl DeclarationWriter {
    /// Render `case` in the declaration text form read by
    /// [`DeclarationParser`](super::DeclarationParser).
    pub fn write(case: &TestCase) -> Result<String> {
        let model = case.model();
        let mut out = String::new();
        writeln!(out, "# {}", case.name())?;
        writeln!(out, "model = Model()")?;
        for (index, operand) in model.operands().iter().enumerate() {
            let mut args = format!(
                "\"{}\", \"{}\", \"{}\"",
                operand.name,
                operand.code(),
                operand.ty.shape_literal()
            );
            if operand.role == OperandRole::Parameter {
                if let Some(value) = operand.constant()? {
                    write!(args, ", [{}]", value.to_literals().join(", "))?;
                }
            }
            writeln!(out, "{} = {}({})", var(index), operand.role.as_str(), args)?;
        }
        for operation in model.operations() {
            let inputs: String = operation
                .inputs
                .iter()
                .map(|index| format!(", {}", var(*index)))
                .collect();
            let outputs: Vec<String> = operation.outputs.iter().map(|index| var(*index)).collect();
            writeln!(
                out,
                "model = model.Operation(\"{}\"{}).To({})",
                operation.op,
                inputs,
                outputs.join(", ")
            )?;
        }
        if model.is_relaxed() {
            writeln!(out, "model = model.RelaxedExecution(True)")?;
        }
        for (idx, example) in case.examples().iter().enumerate() {
            writeln!(out)?;
            writeln!(out, "# Example {}", idx)?;
            writeln!(out, "input{} = {}", idx, dict(model, &example.inputs))?;
            writeln!(out, "output{} = {}", idx, dict(model, &example.outputs))?;
            writeln!(out, "Example((input{}, output{}))", idx, idx)?;
        }
        for index in case.ignored() {
            writeln!(out, "IgnoreExample({})", index)?;
        }
        Ok(out)
    }
}

fn var(index: usize) -> String {
    format!("o{}", index)
}

/// `{o0: [..]}`; values whose dims differ from the operand's declared dims
/// carry them explicitly as `("{1, 2}", [..])`.
fn dict(model: &Model, side: &ExampleSide) -> String {
    let entries: Vec<String> = side
        .iter()
        .map(|(index, value)| {
            let literals = format!("[{}]", value.to_literals().join(", "));
            let declared = model.operand(index).map(|operand| operand.ty.shape()).ok();
            if declared.as_deref() == Some(value.shape()) {
                format!("{}: {}", var(index), literals)
            } else {
                let dims: Vec<String> = value.shape().iter().map(|d| d.to_string()).collect();
                format!("{}: (\"{{{}}}\", {})", var(index), dims.join(", "), literals)
            }
        })
        .collect();
    format!("{{{}}}", entries.join(", "))
}
