pub mod amount;
pub mod errors;
