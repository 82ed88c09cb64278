/// Build a [`Feed`](crate::Feed) from operand handles and literal lists.
///
/// ```no_run
/// # use nnvector::{values, Input};
/// # fn main() -> anyhow::Result<()> {
/// let i1 = Input::new("op1", "TENSOR_FLOAT32", "{2}")?;
/// let feed = values! { i1 => [-1.5, 10] };
/// # Ok(()) }
/// ```
#[macro_export]
macro_rules! values {
    ($($operand:expr => [$($value:expr),* $(,)?]),* $(,)?) => {
        $crate::Feed::from_pairs(vec![
            $( (
                $operand.name().to_string(),
                vec![$( ($value) as f64 ),*],
            ) ),*
        ])
    };
}

/// Register an example on a test case from literal lists, returning the
/// registration result.
#[macro_export]
macro_rules! try_example {
    ($case:expr, { $($input:tt)* } => { $($output:tt)* }) => {
        $case.example($crate::values! { $($input)* }, $crate::values! { $($output)* })
    };
}
