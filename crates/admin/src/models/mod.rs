//! Form models and validation.

pub mod forms;

pub use forms::{ProductForm, ValidProduct, ValidationErrors};
