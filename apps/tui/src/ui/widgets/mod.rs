pub mod header;
pub mod map;
pub mod popup;
pub mod status;
pub mod tables;
