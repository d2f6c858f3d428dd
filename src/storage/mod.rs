mod csv_file;

pub use csv_file::*;

/// Column names of the ledger file, in order.
pub const HEADER: [&str; 4] = ["Date", "Amount", "Category", "Description"];
