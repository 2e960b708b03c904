//! The shared table.
//!
//! - [`Table`] — Arena of fixed-size [`Spot`] records with the slot↔card mapping
//! - [`Board`] — The single guarded boundary every actor goes through
//! - [`View`] — Point-in-time snapshot handed to automated participants
//! - [`TableError`] — Race-induced, non-fatal rejections
mod board;
mod error;
mod spot;
mod table;
mod view;

pub use board::*;
pub use error::*;
pub use spot::*;
pub use table::*;
pub use view::*;
