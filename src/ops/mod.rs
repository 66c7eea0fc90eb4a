pub mod filter;
pub mod notice;
pub mod store;
pub mod view;
