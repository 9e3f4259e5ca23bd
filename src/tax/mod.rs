//! Progressive income taxation and its numeric inverse

mod model;
mod schedule;

pub use model::TaxModel;
pub use schedule::{TaxBracket, TaxSchedule};
