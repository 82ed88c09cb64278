//! Owned tensor container.
//!
//! `Tensor<T>` keeps flat row-major storage next to its shape. Test vectors
//! never need strided views, so the layout is always contiguous.
use anyhow::{anyhow, Result};

use super::shape::numel;

/// Owned tensor with row-major data and a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T> {
    pub data: Vec<T>,
    shape: Vec<usize>,
}

impl<T> Tensor<T> {
    /// Build a rank-1 tensor from a flat data vector.
    pub fn from_vec(data: Vec<T>) -> Self {
        let shape = vec![data.len()];
        Self { data, shape }
    }

    /// Build a tensor with an explicit shape.
    ///
    /// An empty shape is a scalar and holds exactly one value.
    pub fn from_vec_with_shape(data: Vec<T>, shape: Vec<usize>) -> Result<Self> {
        let expected = numel(&shape);
        if expected != data.len() {
            return Err(anyhow!(
                "tensor shape {:?} expects {} values, got {}",
                shape,
                expected,
                data.len()
            ));
        }
        Ok(Self { data, shape })
    }

    /// Return the raw data length.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Return the tensor shape.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Map every element into a new tensor of the same shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Tensor<U> {
        Tensor {
            data: self.data.iter().map(f).collect(),
            shape: self.shape.clone(),
        }
    }

    /// Replace the shape, keeping the data.
    pub fn reshape(self, shape: Vec<usize>) -> Result<Self> {
        Self::from_vec_with_shape(self.data, shape)
    }
}
