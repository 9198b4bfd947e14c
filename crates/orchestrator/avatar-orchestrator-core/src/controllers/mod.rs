pub mod animation;
pub mod lipsync;

pub use animation::AnimationController;
pub use lipsync::LipsyncController;
