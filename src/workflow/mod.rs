pub mod generate_flow;
pub mod progress;

pub use generate_flow::{GenerateFlow, GeneratedReport};
pub use progress::{ProgressBar, ProgressTicker};
