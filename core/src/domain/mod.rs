pub mod common;
pub mod health;
pub mod messaging;
pub mod shopping_list;
