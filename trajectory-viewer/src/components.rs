pub mod trajectory;

pub use trajectory::RlmTrajectory;
