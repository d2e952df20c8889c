pub mod config;
pub mod ocr;
pub mod preflight;
pub mod preprocess;
pub mod scrape;
pub mod segment;
