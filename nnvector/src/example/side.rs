use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::graph::Model;
use crate::tensor::{DType, TensorValue};

/// Typed values for a set of operands, keyed by operand index.
///
/// Each value carries its own dims, so one side records both the
/// per-operand dimensions and the per-type value buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExampleSide {
    operands: BTreeMap<usize, TensorValue>,
}

impl ExampleSide {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: usize, value: TensorValue) -> Option<TensorValue> {
        self.operands.insert(index, value)
    }

    pub fn get(&self, index: usize) -> Option<&TensorValue> {
        self.operands.get(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &TensorValue)> {
        self.operands.iter().map(|(index, value)| (*index, value))
    }

    pub fn len(&self) -> usize {
        self.operands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operands.is_empty()
    }

    /// Operands whose values fall in the `dtype` bucket.
    pub fn bucket(&self, dtype: DType) -> impl Iterator<Item = (usize, &TensorValue)> {
        self.iter().filter(move |(_, value)| value.dtype() == dtype)
    }

    /// Recorded dims per operand.
    pub fn dimensions(&self) -> BTreeMap<usize, Vec<usize>> {
        self.operands
            .iter()
            .map(|(index, value)| (*index, value.shape().to_vec()))
            .collect()
    }
}

/// Untyped literal values keyed by operand name, as written in a
/// declaration. Resolved against a model into an [`ExampleSide`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feed {
    entries: Vec<(String, Vec<f64>)>,
}

impl Feed {
    pub fn from_pairs(entries: Vec<(String, Vec<f64>)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, Vec<f64>)] {
        &self.entries
    }

    /// Convert every entry to its operand's element type and shape.
    ///
    /// Operands with dynamic dims keep the literal list as a rank-1 shape.
    pub fn resolve(&self, model: &Model) -> Result<ExampleSide> {
        let mut side = ExampleSide::new();
        for (name, values) in &self.entries {
            let index = model
                .index_of(name)
                .ok_or_else(|| anyhow!("example references unknown operand {}", name))?;
            let operand = model.operand(index)?;
            let shape = if operand.ty.is_dynamic() {
                vec![values.len()]
            } else {
                operand.ty.shape()
            };
            let value = TensorValue::from_literals(operand.code().dtype(), values, shape)
                .map_err(|err| anyhow!("operand {}: {}", name, err))?;
            if side.insert(index, value).is_some() {
                return Err(anyhow!("operand {} has values twice in one example", name));
            }
        }
        Ok(side)
    }
}
