//! External delivery channels for events leaving the process.

pub mod webhook;
