//! HTTP request handlers.

pub mod actions;
pub mod pages;
