pub mod candidate;
pub mod curve;
pub mod feedback;
pub mod koi;

pub use candidate::*;
pub use curve::*;
pub use feedback::*;
pub use koi::*;
