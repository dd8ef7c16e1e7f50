//! Shared record schema for the scholarship catalog.
//!
//! Every crate in the workspace speaks in terms of [`ScholarshipRecord`] and
//! the closed [`Attribute`] enumeration defined here. The store persists
//! records, the query engine derives views from them; neither adds fields of
//! its own.

mod attribute;
mod record;

pub use attribute::{Attribute, UnknownAttribute};
pub use record::{RecordFields, ScholarshipRecord};
