// API client module
// HTTP transport for the banking API under test, plus response id extraction

pub mod client;

pub use client::{extract_entity_id, ApiError, ApiResponse, ApiVariant, BankClient};
