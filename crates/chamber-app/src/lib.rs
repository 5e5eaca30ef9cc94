pub mod app;
pub mod config;
pub mod error;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;
