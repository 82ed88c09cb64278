use anyhow::{anyhow, Result};

use crate::example::{Example, ExampleSide};
use crate::executor::{Backend, ReferenceBackend};
use crate::graph::Model;
use crate::random::Random;
use crate::tensor::{DType, TensorValue, F16};

/// Build an example with seeded random inputs and outputs computed by the
/// strict reference backend.
///
/// Every input needs fully known dims.
pub fn synthesize_example(model: &Model, seed: u64) -> Result<Example> {
    let mut inputs = ExampleSide::new();
    for (offset, index) in model.inputs().into_iter().enumerate() {
        let operand = model.operand(index)?;
        if operand.ty.is_dynamic() {
            return Err(anyhow!(
                "cannot synthesize values for {} with unknown dims",
                operand.name
            ));
        }
        let shape = operand.ty.shape();
        let seed = seed.wrapping_add(offset as u64);
        let value: TensorValue = match operand.code().dtype() {
            DType::F32 => Random::<f32>::generate_with_seed(seed, (-10.0, 10.0), shape)?.into(),
            DType::F16 => Random::<F16>::generate_with_seed(
                seed,
                (F16::from_f32(-10.0), F16::from_f32(10.0)),
                shape,
            )?
            .into(),
            DType::I32 => Random::<i32>::generate_with_seed(seed, (-100, 100), shape)?.into(),
            DType::U8 => Random::<u8>::generate_with_seed(seed, (0, 255), shape)?.into(),
            DType::Bool => Random::<i32>::generate_with_seed(seed, (0, 1), shape)?
                .map(|v| *v != 0)
                .into(),
        };
        inputs.insert(index, value);
    }
    let outputs = ReferenceBackend::strict().execute(model, &inputs)?;
    Ok(Example { inputs, outputs })
}
