mod animation;
mod animation_state;
mod character;
mod skeleton;
mod skinning;

pub use animation::*;
pub use animation_state::*;
pub use character::*;
pub use skeleton::*;
pub use skinning::*;
