mod card;
mod cascade;
mod client;
mod containers;
mod diagnostics;
mod extractor;
mod helper;
mod page;
mod parsers;

pub use client::Client;
pub use extractor::{extract, extract_at};
