// Explorer genesis uploader common library - main library exports

pub mod genesis;
pub mod keys;
pub mod records;
pub mod source;
pub mod store;
pub mod wire;

// Flattened re-exports
pub use self::genesis::*;
pub use self::records::*;
