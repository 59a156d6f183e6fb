pub mod extractor;
pub mod loader;
pub mod types;
pub mod utils;

pub use extractor::{extract, Extraction};
pub use loader::load_sheet;
pub use types::{SectionSpec, Sheet, SheetLayout};
