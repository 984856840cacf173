#[cfg(feature = "full")]
mod client;
mod form;
#[cfg(feature = "full")]
mod submission;
mod value_object;

#[cfg(feature = "full")]
pub use client::*;
pub use form::*;
#[cfg(feature = "full")]
pub use submission::*;
pub use value_object::*;
