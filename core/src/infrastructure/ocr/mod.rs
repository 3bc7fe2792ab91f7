pub mod textract;

pub use textract::TextractTextDetector;
