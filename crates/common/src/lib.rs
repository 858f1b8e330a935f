//! Webcheck Common Library
//!
//! Pure utility layer shared by the E2E harness: random string/email/number
//! generation, date formatting, structured test-data records with
//! override-wins merging, and safe dotted-path extraction over JSON values.
//!
//! Nothing in this crate touches a browser or the network; everything is
//! driven by the process clock and RNG only.

pub mod error;
pub mod strings;
pub mod testdata;
pub mod value;

// Re-export commonly used items
pub use error::{Error, Result};
pub use strings::{
    capitalize_first_letter, format_date, generate_random_email, generate_random_number,
    generate_random_string, truncate_string,
};
pub use testdata::{
    deep_clone, generate_product_data, generate_user_data, get_random_item, merge_test_data,
    shuffle_array,
};
pub use value::extract_path;

/// Webcheck version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
