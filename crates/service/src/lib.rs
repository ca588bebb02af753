//! Service layer providing the song catalog business operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Carries one error taxonomy (`errors::ErrorCode`) up to the transport.

pub mod errors;
pub mod pagination;
pub mod song;
#[cfg(test)]
pub mod test_support;
