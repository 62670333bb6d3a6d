// File I/O: count sheets in, result workbook out

pub mod column;
pub mod csv;
pub mod error;
pub mod reader;
pub mod writer;

pub use error::IoError;
pub use reader::{read_rows, ReadOptions, SheetRows};
pub use writer::{write_report, WriteOptions, WriteStats};
