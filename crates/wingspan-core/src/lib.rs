pub mod error;
pub mod tolerance;
pub mod traits;

pub use error::{Result, WingspanError};
pub use tolerance::Tolerance;
