//! Static portfolio content: travel locations, achievements and highlights.

pub mod achievement;
pub mod document;
pub mod error;
pub mod highlight;
pub mod location;

pub use achievement::*;
pub use document::*;
pub use error::*;
pub use highlight::*;
pub use location::*;
