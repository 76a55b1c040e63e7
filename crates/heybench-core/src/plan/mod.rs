pub mod io;
pub mod model;
pub mod validation;

pub use io::{read_plan, write_plan};
pub use model::{HttpMethod, RunPlan, Target};
pub use validation::validate_plan;
