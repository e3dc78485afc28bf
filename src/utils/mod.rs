pub mod json;
pub mod path;
pub mod slug;
