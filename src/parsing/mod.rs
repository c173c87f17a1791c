//! Parsing of the textual instance format.
//!
//! An instance file opens with a three-line header giving the number of steps, users, and
//! constraint lines, followed by exactly that many constraint lines:
//!
//! ```text
//! #Steps: 3
//! #Users: 2
//! #Constraints: 3
//! Authorisations u1 s1 s2
//! Separation-of-duty s1 s2
//! At-most-k 2 s1 s2 s3
//! ```
//!
//! Step and user indices are 1-based in the text and 0-based in the
//! [`Instance`](crate::model::Instance). Content after the final constraint line is ignored.
//!
//! # Example
//! ```
//! use warrant::parsing::parse_instance;
//!
//! let source = "\
//! #Steps: 2
//! #Users: 2
//! #Constraints: 1
//! Binding-of-duty s1 s2
//! ";
//!
//! let instance = parse_instance(source)?;
//! assert_eq!(instance.step_count(), 2);
//! assert_eq!(instance.binding_of_duty().len(), 1);
//! # Ok::<(), warrant::parsing::ParseError>(())
//! ```

mod error;
mod reader;

pub use error::ParseError;
pub use reader::parse_instance;
