//! The unified description table: one row per phone occurrence

pub mod filter;
pub mod split;
pub mod table;

pub use filter::{sample_fraction, DescriptionFilter};
pub use split::{assign_random_split, stratified_split, TEST, TRAIN};
pub use table::{load_or_build, read_csv, write_csv, DescriptionRow};
