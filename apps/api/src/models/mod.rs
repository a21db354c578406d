pub mod material;
pub mod test_output;

pub use material::{MaterialKind, MaterialSource};
pub use test_output::{GeneratedTest, TestOutput, TestView, ViewPanel};
