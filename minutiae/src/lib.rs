pub use collection::Minutiae;
pub use encoding::MinutiaeEncoder;
pub use error::{Corruption, Error};
pub use math::{manhattan_distance, minutia_from_drag};
pub use parsing::MinutiaeReader;
pub use types::{FileFormat, ImageSize, Minutia, MinutiaType, Point};

mod collection;
pub mod consts;
mod encoding;
mod error;
mod math;
pub mod parsing;
mod records;
pub mod types;
