//! Data types for the grid: column descriptors, rows and the page wire format.

mod cell;
mod column;
mod page;

pub use cell::*;
pub use column::*;
pub use page::*;
