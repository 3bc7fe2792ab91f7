pub mod from_image;
pub mod from_text;
