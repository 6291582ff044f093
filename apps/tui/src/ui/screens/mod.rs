pub mod list;
pub mod map;
