pub mod styles;
pub mod view;

pub use view::RlmTrajectory;
