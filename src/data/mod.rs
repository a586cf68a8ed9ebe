//! Data module - indicator loading, tidying, merging and filtering

mod cache;
mod filter;
mod loader;
mod merger;
mod processor;
mod value;

pub use cache::{Dataset, DATASET};
pub use filter::{Selection, ViewTable};
pub use merger::{MergedRow, MergedTable};
pub use value::{FillAxis, FillScope, Indicator};
