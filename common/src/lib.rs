//! Fieldguide Common – shared species types and form validation.
//!
//! Framework-free on purpose: everything in this crate compiles for both the
//! native server and the WASM client, and is unit-testable without a UI.

pub mod form;
pub mod species;

pub use form::{FormErrors, SpeciesForm, SpeciesPatch};
pub use species::{Kingdom, Species};
