//! Core association logic module

pub mod connector;
pub mod dispatch;
pub mod error;
pub mod listener;
pub mod security;
pub mod service;
pub mod types;
