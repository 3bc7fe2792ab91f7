pub mod health;
pub mod server;
pub mod shopping_list;
pub mod sms;
