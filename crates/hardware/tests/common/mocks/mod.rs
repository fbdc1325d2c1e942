pub mod model;
pub mod scripted;
