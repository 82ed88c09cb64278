//! Test cases: a model plus the examples registered against it.
use std::collections::BTreeSet;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::graph::{Model, OperandRole};
use crate::tensor::numel;

use super::side::{ExampleSide, Feed};

/// One (inputs, expected outputs) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub inputs: ExampleSide,
    pub outputs: ExampleSide,
}

/// A declared model and its example collection.
///
/// Every declaration builds its own case, so examples never leak between
/// declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    name: String,
    model: Model,
    examples: Vec<Example>,
    #[serde(default)]
    ignored: BTreeSet<usize>,
}

impl TestCase {
    pub fn new(name: impl Into<String>, model: Model) -> Self {
        Self {
            name: name.into(),
            model,
            examples: Vec::new(),
            ignored: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    /// Register an example from literal feeds.
    pub fn example(&mut self, inputs: Feed, outputs: Feed) -> Result<&mut Self> {
        let inputs = inputs.resolve(&self.model)?;
        let outputs = outputs.resolve(&self.model)?;
        self.examples.push(Example { inputs, outputs });
        Ok(self)
    }

    /// Register an already typed example.
    pub fn push_example(&mut self, example: Example) -> &mut Self {
        self.examples.push(example);
        self
    }

    /// Skip the example at `index` when running the case.
    pub fn ignore(&mut self, index: usize) -> &mut Self {
        self.ignored.insert(index);
        self
    }

    pub fn is_ignored(&self, index: usize) -> bool {
        self.ignored.contains(&index)
    }

    pub fn ignored(&self) -> impl Iterator<Item = usize> + '_ {
        self.ignored.iter().copied()
    }

    /// Validate the model and every example against it.
    pub fn validate(&self) -> Result<()> {
        self.model
            .validate()
            .map_err(|err| anyhow!("{}: invalid model: {}", self.name, err))?;
        if self.examples.is_empty() {
            return Err(anyhow!("{}: no examples registered", self.name));
        }
        for &index in &self.ignored {
            if index >= self.examples.len() {
                return Err(anyhow!(
                    "{}: ignored example {} does not exist",
                    self.name,
                    index
                ));
            }
        }
        for (idx, example) in self.examples.iter().enumerate() {
            self.validate_side(&example.inputs, OperandRole::Input)
                .map_err(|err| anyhow!("{}: example {} inputs: {}", self.name, idx, err))?;
            self.validate_side(&example.outputs, OperandRole::Output)
                .map_err(|err| anyhow!("{}: example {} outputs: {}", self.name, idx, err))?;
        }
        Ok(())
    }

    fn validate_side(&self, side: &ExampleSide, role: OperandRole) -> Result<()> {
        for (index, _) in side.iter() {
            let operand = self.model.operand(index)?;
            if operand.role != role {
                return Err(anyhow!(
                    "operand {} is {}, expected {}",
                    operand.name,
                    operand.role.as_str(),
                    role.as_str()
                ));
            }
        }
        let expected = match role {
            OperandRole::Input => self.model.inputs(),
            _ => self.model.outputs(),
        };
        for index in expected {
            let operand = self.model.operand(index)?;
            let value = side
                .get(index)
                .ok_or_else(|| anyhow!("missing values for {}", operand.name))?;
            if value.dtype() != operand.code().dtype() {
                return Err(anyhow!(
                    "operand {} of type {} has {} values",
                    operand.name,
                    operand.code(),
                    value.dtype().as_str()
                ));
            }
            if value.len() != numel(value.shape()) {
                return Err(anyhow!(
                    "operand {} has {} values for dims {:?}",
                    operand.name,
                    value.len(),
                    value.shape()
                ));
            }
            if operand.ty.is_dynamic() {
                if value.shape().len() != operand.ty.dims.len() {
                    return Err(anyhow!(
                        "operand {} expects rank {}, example has dims {:?}",
                        operand.name,
                        operand.ty.dims.len(),
                        value.shape()
                    ));
                }
            } else if value.len() != operand.ty.numel() || value.shape() != operand.ty.shape() {
                return Err(anyhow!(
                    "operand {} declares {:?} ({} values), example has {} values",
                    operand.name,
                    operand.ty.dims,
                    operand.ty.numel(),
                    value.len()
                ));
            }
        }
        Ok(())
    }

    /// Variant whose output operands have unknown dims.
    ///
    /// Examples keep the concrete dims so the inferred output shape can be
    /// checked after execution.
    pub fn dynamic_output_shape(&self) -> Result<TestCase> {
        let mut model = self.model.clone();
        for index in model.outputs() {
            let mut ty = model.operand(index)?.ty.clone();
            if !ty.code.is_tensor() {
                continue;
            }
            ty.dims = vec![0; ty.dims.len()];
            model.set_operand_type(index, ty)?;
        }
        Ok(TestCase {
            name: format!("{}_dynamic_output_shape", self.name),
            model,
            examples: self.examples.clone(),
            ignored: self.ignored.clone(),
        })
    }
}
