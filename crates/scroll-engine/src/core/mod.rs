pub mod math;
pub mod random;
pub mod scene;
pub mod time;
