pub mod entities;
pub mod formatter;
pub mod helpers;
pub mod ports;
pub mod services;
pub mod value_objects;
