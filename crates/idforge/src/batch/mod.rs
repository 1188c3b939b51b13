mod job;
mod orchestrator;
mod worker;
mod yield_now;
pub use job::*;
pub use orchestrator::*;
pub use worker::*;
pub use yield_now::*;
