use bytemuck::{Pod, Zeroable};

/// IEEE 754 half-precision (F16) scalar storage.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct F16 {
    pub bits: u16,
}

impl F16 {
    /// Convert from f32 to F16.
    pub fn from_f32(value: f32) -> Self {
        let bits = value.to_bits();
        let sign = ((bits >> 16) & 0x8000) as u16;
        let exp = ((bits >> 23) & 0xff) as i32;
        let mant = bits & 0x7fffff;
        let f16_bits = match exp {
            0 => sign,
            255 => {
                if mant == 0 {
                    sign | 0x7c00
                } else {
                    sign | 0x7c00 | ((mant >> 13) as u16) | 1
                }
            }
            _ => {
                let exp16 = exp - 127 + 15;
                if exp16 >= 0x1f {
                    sign | 0x7c00
                } else if exp16 <= 0 {
                    if exp16 < -10 {
                        sign
                    } else {
                        let mant16 = mant | 0x800000;
                        let shift = (14 - exp16) as u32;
                        let half = (mant16 >> shift) as u16;
                        let rem = mant16 & ((1 << shift) - 1);
                        sign | round_half_even(half, rem, 1 << (shift - 1))
                    }
                } else {
                    let half = ((exp16 as u16) << 10) | ((mant >> 13) as u16);
                    sign | round_half_even(half, mant & 0x1fff, 0x1000)
                }
            }
        };
        Self { bits: f16_bits }
    }

    /// Convert F16 to f32.
    pub fn to_f32(self) -> f32 {
        let sign = ((self.bits & 0x8000) as u32) << 16;
        let exp = (self.bits >> 10) & 0x1f;
        let mant = (self.bits & 0x03ff) as u32;
        let bits = if exp == 0 {
            if mant == 0 {
                sign
            } else {
                let mut mant = mant;
                let mut exp = -1i32;
                while (mant & 0x0400) == 0 {
                    mant <<= 1;
                    exp -= 1;
                }
                mant &= 0x03ff;
                let exp32 = (exp + 1 + 127 - 15) as u32;
                sign | (exp32 << 23) | (mant << 13)
            }
        } else if exp == 0x1f {
            sign | 0x7f800000 | (mant << 13)
        } else {
            let exp32 = (exp as u32) + (127 - 15);
            sign | (exp32 << 23) | (mant << 13)
        };
        f32::from_bits(bits)
    }
}

/// Round truncated `half` by the discarded bits `rem`, ties to even.
/// A carry out of the mantissa bumps the exponent, up to infinity.
fn round_half_even(half: u16, rem: u32, halfway: u32) -> u16 {
    if rem > halfway || (rem == halfway && half & 1 == 1) {
        half + 1
    } else {
        half
    }
}

/// Round an f32 to the nearest value representable in half precision.
///
/// Relaxed execution computes float32 operands at this precision.
pub fn round_to_f16(value: f32) -> f32 {
    F16::from_f32(value).to_f32()
}
