pub mod error;
pub mod fetcher;
pub mod page_source;
pub mod url;

#[cfg(test)]
pub(crate) mod fake;
