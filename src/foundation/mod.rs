pub(crate) mod check;
pub mod error;
pub mod number;
