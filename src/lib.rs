//! # nmap2json
//!
//! Streaming converter from nmap (or any repetitive) XML output to a JSON
//! array, one converted value per occurrence of a designated tag (by
//! default `host`), without materializing the whole document.
//!
//! The pipeline is a cooperative pull loop: the streaming parser yields one
//! completed element subtree at a time, the transformer turns it into a
//! JSON value following a fixed structural convention, and the array writer
//! appends it to the output before the next subtree is requested. Memory
//! stays bounded by the largest single subtree.
//!
//! ## Example
//!
//! ```rust
//! use nmap2json::{ArrayWriter, Converter, ElementStream};
//!
//! # fn run() -> nmap2json::Result<()> {
//! let xml = r#"<nmaprun><host><status state="up"/></host></nmaprun>"#;
//!
//! let converter = Converter::new();
//! let mut writer = ArrayWriter::new(Vec::new())?;
//!
//! for subtree in ElementStream::new(xml.as_bytes(), "host") {
//!     let value = converter.convert(&subtree?)?;
//!     writer.write_value(&value)?;
//! }
//!
//! let _json = writer.finish()?;
//! # Ok(())
//! # }
//! # run().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod convert;
pub mod element;
pub mod error;
pub mod limits;
pub mod stream;
pub mod writer;

// Re-exports for convenience
pub use convert::{Converter, ConverterConfig};
pub use element::Element;
pub use error::{Error, ParseError, Result, TransformError};
pub use limits::Limits;
pub use stream::ElementStream;
pub use writer::ArrayWriter;

/// Version of the nmap2json library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default designated tag for nmap scan output
pub const DEFAULT_TAG: &str = "host";
