mod health_check;
mod members;

pub use health_check::*;
pub use members::*;
