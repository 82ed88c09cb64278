use anyhow::Result;
use nnvector::{
    broadcast_shape, format_truncated, round_to_f16, DType, Random, Tensor, TensorValue, Timer,
    F16,
};

#[test]
fn literals_convert_per_bucket() -> Result<()> {
    let floats = TensorValue::from_literals(DType::F32, &[-1.5, 10.2], vec![2])?;
    assert_eq!(floats.as_tensor::<f32>()?.data, vec![-1.5, 10.2]);

    let ints = TensorValue::from_literals(DType::I32, &[-3.0, 7.0], vec![2])?;
    assert_eq!(ints.as_tensor::<i32>()?.data, vec![-3, 7]);
    assert!(TensorValue::from_literals(DType::I32, &[1.5], vec![1]).is_err());
    assert!(TensorValue::from_literals(DType::U8, &[256.0], vec![1]).is_err());

    let bools = TensorValue::from_literals(DType::Bool, &[1.0, 0.0], vec![2])?;
    assert_eq!(bools.to_literals(), vec!["True", "False"]);
    assert!(ints.as_tensor::<f32>().is_err());
    Ok(())
}

#[test]
fn text_literals_read_back_bit_exact() -> Result<()> {
    let value = TensorValue::from(Tensor::from_vec(vec![10.2f32, -0.1, 1e-7, 3.4028235e38]));
    let literals = value.to_literals();
    let refs: Vec<&str> = literals.iter().map(String::as_str).collect();
    let parsed = TensorValue::parse_literals(DType::F32, &refs, vec![4])?;
    assert_eq!(parsed, value);
    let suffixed = TensorValue::parse_literals(DType::F32, &["1.5f", "-2"], vec![2])?;
    assert_eq!(suffixed.as_tensor::<f32>()?.data, vec![1.5, -2.0]);
    Ok(())
}

#[test]
fn half_precision_ties_round_to_even() {
    assert_eq!(round_to_f16(2049.0), 2048.0);
    assert_eq!(round_to_f16(2051.0), 2052.0);
    assert_eq!(round_to_f16(2049.5), 2050.0);
    assert_eq!(round_to_f16(-2049.0), -2048.0);
    assert_eq!(round_to_f16(10.2), 10.203125);
    assert_eq!(round_to_f16(65520.0), f32::INFINITY);
    assert_eq!(round_to_f16(65519.0), 65504.0);

    let tiny = 2f32.powi(-24);
    assert_eq!(round_to_f16(tiny * 0.5), 0.0);
    assert_eq!(round_to_f16(tiny * 1.5), tiny * 2.0);
    assert_eq!(round_to_f16(tiny * 2.5), tiny * 2.0);
    assert_eq!(round_to_f16(tiny * 0.75), tiny);
    assert_eq!(F16::from_f32(1.0).bits, 0x3c00);
}

#[test]
fn raw_bytes_round_trip() -> Result<()> {
    let value = TensorValue::from(Tensor::from_vec_with_shape(vec![1i32, -2, 3, -4], vec![2, 2])?);
    let bytes = value.to_le_bytes();
    assert_eq!(bytes.len(), 16);
    assert_eq!(TensorValue::from_le_bytes(DType::I32, &bytes, vec![2, 2])?, value);
    assert!(TensorValue::from_le_bytes(DType::I32, &bytes[..15], vec![2, 2]).is_err());
    Ok(())
}

#[test]
fn broadcast_shapes_follow_trailing_alignment() -> Result<()> {
    assert_eq!(broadcast_shape(&[2, 3], &[3])?, vec![2, 3]);
    assert_eq!(broadcast_shape(&[4, 1, 3], &[2, 1])?, vec![4, 2, 3]);
    assert!(broadcast_shape(&[2, 3], &[2]).is_err());
    assert!(Tensor::from_vec_with_shape(vec![1.0f32; 3], vec![2, 2]).is_err());
    Ok(())
}

#[test]
fn random_tensors_are_seeded() -> Result<()> {
    let a = Random::<f32>::generate_with_seed(9, (-1.0, 1.0), vec![2, 8])?;
    let b = Random::<f32>::generate_with_seed(9, (-1.0, 1.0), vec![2, 8])?;
    assert_eq!(a, b);
    assert_eq!(a.shape(), &[2, 8]);
    assert!(a.data.iter().all(|v| (-1.0..=1.0).contains(v)));

    let halves = Random::<F16>::generate_with_seed(1, (F16::from_f32(0.0), F16::from_f32(2.0)), vec![4])?;
    assert!(halves.data.iter().all(|v| (0.0..=2.0).contains(&v.to_f32())));
    assert!(Random::<i32>::generate_with_seed(1, (5, 1), vec![1]).is_err());
    Ok(())
}

#[test]
fn truncated_format_and_timer() {
    assert_eq!(format_truncated(&[1i32, 2, 3]), "{1, 2, 3}");
    assert_eq!(format_truncated(&[1i32, 2, 3, 4, 5, 6]), "{1, 2 ... 5, 6}");
    Timer::start("tensor_values");
    let elapsed = Timer::stop("tensor_values");
    assert_eq!(Timer::elapsed("tensor_values"), Some(elapsed));
}
