use anyhow::{anyhow, Result};

pub fn numel(shape: &[usize]) -> usize {
    shape.iter().copied().product::<usize>()
}

fn compute_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![0; shape.len()];
    let mut stride = 1usize;
    for (idx, dim) in shape.iter().rev().enumerate() {
        let i = shape.len() - 1 - idx;
        strides[i] = stride;
        stride = stride.saturating_mul(*dim);
    }
    strides
}

/// Numpy-style broadcast of two shapes, aligned from the innermost dim.
pub fn broadcast_shape(a: &[usize], b: &[usize]) -> Result<Vec<usize>> {
    let out_rank = a.len().max(b.len());
    let mut out = vec![1usize; out_rank];
    for (i, slot) in out.iter_mut().enumerate() {
        let a_dim = dim_from_right(a, out_rank, i);
        let b_dim = dim_from_right(b, out_rank, i);
        if a_dim == b_dim || a_dim == 1 || b_dim == 1 {
            *slot = a_dim.max(b_dim);
        } else {
            return Err(anyhow!(
                "incompatible broadcast dims {} and {}",
                a_dim,
                b_dim
            ));
        }
    }
    Ok(out)
}

/// Strides of `shape` expanded to `out_rank`, zeroed on broadcast dims.
pub fn broadcast_strides(shape: &[usize], out_rank: usize) -> Vec<usize> {
    let strides = compute_strides(shape);
    let offset = out_rank.saturating_sub(shape.len());
    (0..out_rank)
        .map(|i| {
            if i < offset {
                return 0;
            }
            let src_i = i - offset;
            if shape[src_i] == 1 {
                0
            } else {
                strides[src_i]
            }
        })
        .collect()
}

/// Visit every output position with the matching offsets of both operands.
pub fn for_each_broadcast_index(
    out_shape: &[usize],
    a_strides: &[usize],
    b_strides: &[usize],
    mut f: impl FnMut(usize, usize, usize),
) {
    if out_shape.is_empty() {
        f(0, 0, 0);
        return;
    }
    let out_strides = compute_strides(out_shape);
    let mut index = vec![0usize; out_shape.len()];
    for _ in 0..numel(out_shape) {
        let out_offset = linear_offset(&index, &out_strides);
        let a_offset = linear_offset(&index, a_strides);
        let b_offset = linear_offset(&index, b_strides);
        f(out_offset, a_offset, b_offset);
        bump_index(&mut index, out_shape);
    }
}

fn dim_from_right(shape: &[usize], out_rank: usize, idx: usize) -> usize {
    let offset = out_rank.saturating_sub(shape.len());
    if idx < offset {
        1
    } else {
        shape[idx - offset]
    }
}

fn linear_offset(indices: &[usize], strides: &[usize]) -> usize {
    indices
        .iter()
        .zip(strides.iter())
        .map(|(i, s)| i.saturating_mul(*s))
        .sum()
}

fn bump_index(index: &mut [usize], shape: &[usize]) {
    for (i, dim) in shape.iter().enumerate().rev() {
        index[i] += 1;
        if index[i] < *dim {
            return;
        }
        index[i] = 0;
    }
}
