use std::fmt;

/// A workflow step.
///
/// Steps are indexed from zero internally; the textual format is 1-based, which the
/// [`fmt::Display`] implementation reproduces (`Step::new(0)` renders as `s1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Step(u32);

impl Step {
    pub fn new(index: u32) -> Step {
        Step(index)
    }

    /// The 0-based index of this step.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0 + 1)
    }
}

/// A user from the pool, indexed from zero internally and rendered 1-based (`u1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct User(u32);

impl User {
    pub fn new(index: u32) -> User {
        User(index)
    }

    /// The 0-based index of this user.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.0 + 1)
    }
}
