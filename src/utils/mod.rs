pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use coordinates::{join_coordinate, split_coordinate};
pub use filename::suggested_file_name;
pub use progress::ProgressReporter;
