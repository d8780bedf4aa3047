//! Derive macros shared by the personnummer modules.

pub use derive_more::Display;
