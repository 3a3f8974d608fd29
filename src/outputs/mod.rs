//! Output generation.
//!
//! # Submodules
//!
//! - [`csv`]: Writes extracted rows to a CSV file with a fixed header
//!
//! # Output Structure
//!
//! ```text
//! working_dir/
//! ├── euiposcrape.csv   # EU register rows
//! └── tmdata.csv        # UK register rows
//! ```

pub mod csv;
