mod index;
mod loader;
mod model;

pub use index::*;
pub use loader::*;
pub use model::*;
