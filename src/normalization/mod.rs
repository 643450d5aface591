mod normalizer;
mod policy;

pub use normalizer::{DEGENERATE_MIDPOINT, Normalizer, normalize};
pub use policy::DegeneratePolicy;
