pub mod receive_event;
pub mod receive_message;
