pub mod applications;
pub mod handlers;
