//! dns-check Infrastructure Layer
pub mod dns;
