pub mod drug;
pub mod enums;
pub mod interaction;
pub mod label;
pub mod resources;

pub use drug::*;
pub use enums::*;
pub use interaction::*;
pub use label::*;
pub use resources::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid {field} value: {value}")]
    InvalidEnum { field: String, value: String },
}
