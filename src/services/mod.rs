//! Service layer for I/O and format concerns
//!
//! Keeps file handling and encoding details out of the processing pipeline.

pub mod format;
pub mod io;

pub use format::OutputFormatHandler;
pub use io::ImageIoService;
