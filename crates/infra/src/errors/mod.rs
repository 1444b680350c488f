//! Infrastructure error conversions

mod conversions;

pub use conversions::{storage_error_from_io, storage_error_from_keyring, transport_error, InfraError};
