//! Structured data extraction for dexonline.ro definition pages
//!
//! Turns a definition page into:
//! - Synthesis entries (definitions, expressions, examples, etymology, relations)
//! - Inflection models, with merged table cells expanded into full grids
//!
//! Pages can be parsed directly with [`parse`] or looked up with
//! [`fetch_and_parse`] / [`fetch_and_parse_blocking`]. A C ABI is exposed in
//! [`ffi`].

pub mod client;
pub mod constants;
pub mod document;
pub mod error;
pub mod ffi;
pub mod inflection;
pub mod options;
pub mod parser;
pub mod synthesis;

pub use client::{definition_url, fetch_and_parse, fetch_and_parse_blocking, BlockingClient, Client, ClientConfig};
pub use error::{Error, MalformedMarkup, Result};
pub use inflection::{InflectionHeader, InflectionTable};
pub use options::{DictionaryFlags, MalformedPolicy, MatchingMode, ParserOptions};
pub use parser::{parse, Results};
pub use synthesis::{Definition, DictionaryEntry, Etymology, Example, Expression, Relations, Row};
