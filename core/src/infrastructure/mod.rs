pub mod image_fetch;
pub mod nlp;
pub mod ocr;
