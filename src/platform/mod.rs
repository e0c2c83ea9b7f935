mod error;
mod model;

pub mod archive;
pub mod instagram;

pub use error::*;
pub use model::*;

pub use instagram::PlatformInstagram;
