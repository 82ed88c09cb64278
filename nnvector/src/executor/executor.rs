use anyhow::{anyhow, Result};

use crate::example::ExampleSide;
use crate::formatting::format_tensor;
use crate::graph::{describe_operation, Model, OperandRole};
use crate::ops::{lookup_kernel, Precision};
use crate::tensor::TensorValue;

/// Runs a model operation by operation on the reference kernels.
pub struct Executor<'a> {
    model: &'a Model,
    precision: Precision,
    table: Vec<Option<TensorValue>>,
}

impl<'a> Executor<'a> {
    pub fn new(model: &'a Model, precision: Precision) -> Self {
        Self {
            model,
            precision,
            table: vec![None; model.operands().len()],
        }
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Bind a model input.
    pub fn insert(&mut self, index: usize, value: TensorValue) -> Result<()> {
        let operand = self.model.operand(index)?;
        if operand.role != OperandRole::Input {
            return Err(anyhow!(
                "cannot insert into {} operand {}",
                operand.role.as_str(),
                operand.name
            ));
        }
        if value.dtype() != operand.code().dtype() {
            return Err(anyhow!(
                "operand {} of type {} cannot take {} data",
                operand.name,
                operand.code(),
                value.dtype().as_str()
            ));
        }
        self.table[index] = Some(value);
        Ok(())
    }

    /// Run every operation in declaration order.
    pub fn run(&mut self) -> Result<()> {
        for (index, operand) in self.model.operands().iter().enumerate() {
            match operand.role {
                OperandRole::Parameter => self.table[index] = operand.constant()?,
                OperandRole::Input if self.table[index].is_none() => {
                    return Err(anyhow!("input {} was not provided", operand.name));
                }
                _ => {}
            }
        }
        for operation in self.model.operations() {
            let label = describe_operation(self.model, operation);
            crate::trace!("exec {}", label);
            let inputs = operation
                .inputs
                .iter()
                .map(|index| {
                    self.table[*index]
                        .clone()
                        .ok_or_else(|| anyhow!("{}: operand #{} has no value", label, index))
                })
                .collect::<Result<Vec<_>>>()?;
            let dtype = inputs
                .first()
                .map(TensorValue::dtype)
                .ok_or_else(|| anyhow!("{}: no inputs", label))?;
            let Some(kernel) = lookup_kernel(operation.op, dtype) else {
                crate::critical!("{}: no reference kernel for {}", label, dtype.as_str());
                return Err(anyhow!("{}: no reference kernel for {}", label, dtype.as_str()));
            };
            let result = kernel(&inputs, self.precision)?;
            let out_index = *operation
                .outputs
                .first()
                .ok_or_else(|| anyhow!("{}: no outputs", label))?;
            let output = self.model.operand(out_index)?;
            if !output.ty.is_dynamic() && result.shape() != output.ty.shape().as_slice() {
                return Err(anyhow!(
                    "{}: produced dims {:?}, operand declares {:?}",
                    label,
                    result.shape(),
                    output.ty.dims
                ));
            }
            crate::trace!("{} = {}", label, format_tensor(&result));
            self.table[out_index] = Some(result);
        }
        Ok(())
    }

    /// Fetch the value of any operand after `run`.
    pub fn fetch(&self, index: usize) -> Result<&TensorValue> {
        let operand = self.model.operand(index)?;
        self.table[index]
            .as_ref()
            .ok_or_else(|| anyhow!("operand {} has no value", operand.name))
    }

    /// Collect all model outputs.
    pub fn outputs(&self) -> Result<ExampleSide> {
        let mut side = ExampleSide::new();
        for index in self.model.outputs() {
            side.insert(index, self.fetch(index)?.clone());
        }
        Ok(side)
    }
}
