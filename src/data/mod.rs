mod loader;
mod reference_dataset;

pub use loader::{LABEL_COLUMN, load_reference_dataset, read_reference_dataset};
pub use reference_dataset::ReferenceDataset;
