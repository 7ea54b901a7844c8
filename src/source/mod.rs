//! Row sources that plug into the cursor

mod memory;

pub use memory::{MemoryResultSet, ProjectingProducer, ResultSetStats};
