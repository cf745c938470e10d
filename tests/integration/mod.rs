//! Shared fixtures for integration tests
#![allow(dead_code)]

pub mod mock_server;
pub mod recording;
