//! Phone-to-class labelling

pub mod labeler;

pub use labeler::{strip_stress, PhoneGroup, PhonemeLabeler, OTHERS_CLASS};
