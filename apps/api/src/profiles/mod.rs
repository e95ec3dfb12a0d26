pub mod category;
pub mod handlers;
pub mod storage;
