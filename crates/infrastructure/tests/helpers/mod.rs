#![allow(dead_code)]

pub mod dns_server_mock;
pub mod scripted_transport;

pub use dns_server_mock::{question_end, MockDnsServer, MockReply};
pub use scripted_transport::ScriptedTransport;
