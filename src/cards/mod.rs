//! Cards, decks, and the set-validity capability.
//!
//! ## Core Types
//!
//! - [`Card`] — An immutable card identified by its index in the full deck
//! - [`Shape`] — Feature count × feature cardinality shared by every card
//! - [`Deck`] — Ordered pool of undealt cards
//!
//! ## Validation
//!
//! - [`Validator`] — Pure predicate and search over card combinations
//! - [`Rules`] — Standard rule: every feature all-same or all-different
//! - [`Combinations`] — Lexicographic k-subsets of an index range
pub mod card;
pub use card::*;

pub mod combinations;
pub use combinations::*;

pub mod deck;
pub use deck::*;

pub mod shape;
pub use shape::*;

pub mod validator;
pub use validator::*;
