use std::marker::PhantomData;

use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::tensor::{numel, Tensor, F16};

/// Seeded random tensor source.
pub struct Random<T> {
    rng: StdRng,
    _marker: PhantomData<T>,
}

impl<T> Random<T>
where
    T: RandomValue,
{
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            _marker: PhantomData,
        }
    }

    pub fn generate_with_seed(seed: u64, range: (T, T), shape: Vec<usize>) -> Result<Tensor<T>> {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_with_rng::<T>(&mut rng, range, shape)
    }

    pub fn next(&mut self, range: (T, T), shape: Vec<usize>) -> Result<Tensor<T>> {
        generate_with_rng::<T>(&mut self.rng, range, shape)
    }
}

fn generate_with_rng<T: RandomValue>(
    rng: &mut StdRng,
    range: (T, T),
    shape: Vec<usize>,
) -> Result<Tensor<T>> {
    let len = numel(&shape);
    let mut data = Vec::with_capacity(len);
    for _ in 0..len {
        data.push(T::sample(rng, range)?);
    }
    Tensor::from_vec_with_shape(data, shape)
}

pub trait RandomValue: Sized + Copy {
    fn sample(rng: &mut StdRng, range: (Self, Self)) -> Result<Self>;
}

fn check_range<T: PartialOrd + std::fmt::Debug>(range: &(T, T)) -> Result<()> {
    if range.0 > range.1 {
        return Err(anyhow!("empty random range {:?}..={:?}", range.0, range.1));
    }
    Ok(())
}

impl RandomValue for f32 {
    fn sample(rng: &mut StdRng, range: (Self, Self)) -> Result<Self> {
        check_range(&range)?;
        Ok(rng.gen_range(range.0..=range.1))
    }
}

impl RandomValue for i32 {
    fn sample(rng: &mut StdRng, range: (Self, Self)) -> Result<Self> {
        check_range(&range)?;
        Ok(rng.gen_range(range.0..=range.1))
    }
}

impl RandomValue for u8 {
    fn sample(rng: &mut StdRng, range: (Self, Self)) -> Result<Self> {
        check_range(&range)?;
        Ok(rng.gen_range(range.0..=range.1))
    }
}

impl RandomValue for F16 {
    fn sample(rng: &mut StdRng, range: (Self, Self)) -> Result<Self> {
        let range = (range.0.to_f32(), range.1.to_f32());
        check_range(&range)?;
        Ok(F16::from_f32(rng.gen_range(range.0..=range.1)))
    }
}
