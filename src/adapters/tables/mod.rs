//! Table Adapters
//!
//! Implementations of the TableReader port.
//!
//! - **FlatFileTableReader** - Reads model files from disk
//! - **InMemoryTableReader** - Serves registered text (testing)

mod flat_file_table_reader;
mod in_memory_table_reader;

pub use flat_file_table_reader::FlatFileTableReader;
pub use in_memory_table_reader::InMemoryTableReader;
