pub mod error;
pub mod normalize;
pub mod thresholds;
pub mod traits;
pub mod types;

pub use error::*;
pub use normalize::*;
pub use thresholds::*;
pub use traits::*;
pub use types::*;
