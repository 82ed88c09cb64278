//! Model graph builder.
//!
//! A model is built by value: every builder call consumes the model and
//! returns the updated one, so a finished declaration is never mutated.
use std::collections::HashSet;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::registry::op_def;
use crate::tensor::broadcast_shape;

use super::operand::{Operand, OperandCode, OperandRole, OperandType};
use super::operation::{Operation, OperationType};

/// Operands, operations and the relaxed-execution flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    operands: Vec<Operand>,
    operations: Vec<Operation>,
    #[serde(default)]
    relaxed: bool,
}

/// An operation waiting for its outputs, see [`Model::operation`].
#[must_use = "an operation is only added once `to` is called"]
pub struct OperationBuilder {
    model: Model,
    op: OperationType,
    inputs: Vec<usize>,
}

impl OperationBuilder {
    /// Bind the outputs and return the updated model.
    pub fn to(self, outputs: &[&Operand]) -> Model {
        let OperationBuilder {
            mut model,
            op,
            inputs,
        } = self;
        let outputs = outputs.iter().map(|operand| model.intern(operand)).collect();
        model.operations.push(Operation {
            op,
            inputs,
            outputs,
        });
        model
    }
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an operation node over `inputs`.
    ///
    /// Operands are added to the model the first time they are referenced and
    /// keep that index; later references resolve by name.
    pub fn operation(mut self, op: OperationType, inputs: &[&Operand]) -> OperationBuilder {
        let inputs = inputs.iter().map(|operand| self.intern(operand)).collect();
        OperationBuilder {
            model: self,
            op,
            inputs,
        }
    }

    /// Return the model with the relaxed-precision flag set.
    pub fn relaxed_execution(mut self, relaxed: bool) -> Self {
        self.relaxed = relaxed;
        self
    }

    pub fn is_relaxed(&self) -> bool {
        self.relaxed
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn operand(&self, index: usize) -> Result<&Operand> {
        self.operands
            .get(index)
            .ok_or_else(|| anyhow!("missing operand index: {}", index))
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.operands.iter().position(|operand| operand.name == name)
    }

    /// Model input indices in declaration order.
    pub fn inputs(&self) -> Vec<usize> {
        self.indices_with_role(OperandRole::Input)
    }

    /// Model output indices in declaration order.
    pub fn outputs(&self) -> Vec<usize> {
        self.indices_with_role(OperandRole::Output)
    }

    fn indices_with_role(&self, role: OperandRole) -> Vec<usize> {
        self.operands
            .iter()
            .enumerate()
            .filter(|(_, operand)| operand.role == role)
            .map(|(index, _)| index)
            .collect()
    }

    fn intern(&mut self, operand: &Operand) -> usize {
        if let Some(index) = self
            .operands
            .iter()
            .position(|existing| existing.name == operand.name && existing == operand)
        {
            return index;
        }
        // A same-named operand with a different type is kept as a separate
        // entry so validation can report the conflict.
        self.operands.push(operand.clone());
        self.operands.len() - 1
    }

    /// Replace an operand type in place. Used to derive model variants.
    pub(crate) fn set_operand_type(&mut self, index: usize, ty: OperandType) -> Result<()> {
        let operand = self
            .operands
            .get_mut(index)
            .ok_or_else(|| anyhow!("missing operand index: {}", index))?;
        operand.ty = ty;
        Ok(())
    }

    /// Check the graph against the op registry and dataflow rules.
    pub fn validate(&self) -> Result<()> {
        if self.operations.is_empty() {
            return Err(anyhow!("model has no operations"));
        }
        let mut names = HashSet::new();
        for operand in &self.operands {
            if !names.insert(operand.name.as_str()) {
                return Err(anyhow!("operand {} is declared twice", operand.name));
            }
            if operand.role == OperandRole::Parameter && operand.value.is_none() {
                return Err(anyhow!("parameter {} has no value", operand.name));
            }
            if operand.role == OperandRole::Parameter {
                operand.constant()?;
            }
        }

        let mut produced = vec![false; self.operands.len()];
        for operation in &self.operations {
            self.validate_operation(operation)?;
            for &input in &operation.inputs {
                let operand = self.operand(input)?;
                let available = matches!(operand.role, OperandRole::Input | OperandRole::Parameter)
                    || produced[input];
                if !available {
                    return Err(anyhow!(
                        "{} reads {} before it is produced",
                        describe_operation(self, operation),
                        operand.name
                    ));
                }
            }
            for &output in &operation.outputs {
                let operand = self.operand(output)?;
                if matches!(operand.role, OperandRole::Input | OperandRole::Parameter) {
                    return Err(anyhow!(
                        "{} writes {} operand {}",
                        describe_operation(self, operation),
                        operand.role.as_str(),
                        operand.name
                    ));
                }
                if produced[output] {
                    return Err(anyhow!("operand {} is produced twice", operand.name));
                }
                produced[output] = true;
            }
        }
        for (index, operand) in self.operands.iter().enumerate() {
            if matches!(operand.role, OperandRole::Output | OperandRole::Internal) && !produced[index]
            {
                return Err(anyhow!(
                    "{} operand {} is never produced",
                    operand.role.as_str(),
                    operand.name
                ));
            }
        }
        Ok(())
    }

    fn validate_operation(&self, operation: &Operation) -> Result<()> {
        let def = op_def(operation.op)
            .ok_or_else(|| anyhow!("operation {} is not registered", operation.op))?;
        if operation.inputs.len() != def.inputs || operation.outputs.len() != def.outputs {
            return Err(anyhow!(
                "{} expects {} inputs and {} outputs, got {} and {}",
                operation.op,
                def.inputs,
                def.outputs,
                operation.inputs.len(),
                operation.outputs.len()
            ));
        }
        let tensors = &operation.inputs[..def.tensor_inputs()];
        let first = self.operand(tensors[0])?;
        for &index in tensors.iter().chain(operation.outputs.iter()) {
            let operand = self.operand(index)?;
            if !def.codes.contains(&operand.code()) {
                return Err(anyhow!(
                    "{} does not support {} operand {}",
                    operation.op,
                    operand.code(),
                    operand.name
                ));
            }
            if operand.code() != first.code() {
                return Err(anyhow!(
                    "{} mixes {} and {} operands",
                    operation.op,
                    first.code(),
                    operand.code()
                ));
            }
        }
        if def.fused_activation {
            let activation = self.operand(operation.inputs[def.tensor_inputs()])?;
            if activation.code() != OperandCode::Int32 {
                return Err(anyhow!(
                    "{} fused activation {} must be INT32, got {}",
                    operation.op,
                    activation.name,
                    activation.code()
                ));
            }
        }

        let output = self.operand(operation.outputs[0])?;
        if output.ty.is_dynamic() {
            return Ok(());
        }
        let expected = if def.broadcast {
            broadcast_shape(
                &self.operand(tensors[0])?.ty.shape(),
                &self.operand(tensors[1])?.ty.shape(),
            )?
        } else {
            first.ty.shape()
        };
        if expected != output.ty.shape() {
            return Err(anyhow!(
                "{} output {} has shape {:?}, expected {:?}",
                operation.op,
                output.name,
                output.ty.dims,
                expected
            ));
        }
        Ok(())
    }
}

/// Human-readable form of one operation, e.g. `FLOOR(op1) >> op2`.
pub fn describe_operation(model: &Model, operation: &Operation) -> String {
    let names = |indices: &[usize]| {
        indices
            .iter()
            .map(|index| {
                model
                    .operands
                    .get(*index)
                    .map(|operand| operand.name.clone())
                    .unwrap_or_else(|| format!("#{}", index))
            })
            .collect::<Vec<_>>()
            .join(",")
    };
    format!(
        "{}({}) >> {}",
        operation.op,
        names(&operation.inputs),
        names(&operation.outputs)
    )
}
