pub mod disk;

pub use disk::{make_data_directory, DiskStorage};
