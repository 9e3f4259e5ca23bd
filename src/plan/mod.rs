//! Plan boundary types, validation, and result assembly

mod assembler;
mod inputs;
mod result;

pub use assembler::PlanAssembler;
pub use inputs::{Payout, PlanInputs, RawPlanInputs, ValidationError};
pub use result::PlanResult;
