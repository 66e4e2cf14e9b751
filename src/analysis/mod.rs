//! Filter & aggregate engine.
//!
//! Pure functions over an already-loaded `Dataset`:
//!
//! - `Filter` narrows a collection to a borrowed `Subset`
//! - `aggregate` turns subsets into KPIs, grouped means and series

pub mod aggregate;
pub mod filter;

pub use aggregate::*;
pub use filter::{Filter, Subset};
