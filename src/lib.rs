pub mod config; pub use config::*;
pub mod error; pub use error::*;
pub mod node; pub use node::*; // category and leaf nodes with sorted children
pub mod category_index; pub use category_index::*; // the category trie
pub mod recommend; pub use recommend::*; // budget-constrained selection
pub mod index_builder; pub use index_builder::*; // record ingestion and resolution
