pub mod answerer;
pub mod math;
pub mod operation;
pub mod providers;

pub use answerer::OneWordAnswerer;
pub use operation::{Classification, Operation, OperationKey};
