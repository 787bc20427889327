pub mod impostor;
pub mod math;

pub mod prelude {
    pub use crate::impostor::*;
    pub use crate::math::prelude::*;
}
