pub mod analysis;
pub mod excel;
pub mod file_processor;
