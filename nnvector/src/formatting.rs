use crate::tensor::{TensorValue, F16};

/// Format a value for compact human-readable output.
pub trait FormatValue {
    fn format_value(&self) -> String;
}

impl FormatValue for f32 {
    fn format_value(&self) -> String {
        format!("{:.2}", self)
    }
}

impl FormatValue for F16 {
    fn format_value(&self) -> String {
        format!("{:.2}", self.to_f32())
    }
}

macro_rules! impl_format_display {
    ($($ty:ty),+ $(,)?) => {
        $(impl FormatValue for $ty {
            fn format_value(&self) -> String {
                self.to_string()
            }
        })+
    };
}

impl_format_display!(i32, u8, bool, String);

/// `{a, b ... y, z}` for long slices, everything for short ones.
pub fn format_truncated<T: FormatValue>(data: &[T]) -> String {
    let len = data.len();
    if len == 0 {
        return "{}".to_string();
    }
    if len <= 4 {
        let joined = data
            .iter()
            .map(FormatValue::format_value)
            .collect::<Vec<_>>()
            .join(", ");
        return format!("{{{}}}", joined);
    }
    let head = &data[..2];
    let tail = &data[len - 2..];
    format!(
        "{{{}, {} ... {}, {}}}",
        head[0].format_value(),
        head[1].format_value(),
        tail[0].format_value(),
        tail[1].format_value()
    )
}

/// Short `dtype[dims] {values}` summary of a tensor value.
pub fn format_tensor(value: &TensorValue) -> String {
    let values = match value {
        TensorValue::F32(t) => format_truncated(&t.data),
        TensorValue::F16(t) => format_truncated(&t.data),
        TensorValue::I32(t) => format_truncated(&t.data),
        TensorValue::U8(t) => format_truncated(&t.data),
        TensorValue::Bool(t) => format_truncated(&t.data),
    };
    format!("{}{:?} {}", value.dtype().as_str(), value.shape(), values)
}
