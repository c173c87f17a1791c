//! The immutable description of a workflow satisfiability instance.
//!
//! An [`Instance`] is produced once, either by [`parsing`](crate::parsing) a textual
//! description or through the `add_*` methods, and is read-only from then on. The solver never
//! mutates it.

mod constraints;
mod indices;
mod instance;

pub use constraints::AtMostK;
pub use constraints::ConstraintKind;
pub use constraints::OneTeam;
pub use indices::Step;
pub use indices::User;
pub use instance::Instance;
