mod assignment;
mod solve_status;

pub use assignment::Assignment;
pub use solve_status::SolveStatus;

/// A [`std::collections::HashMap`] with the Fnv hasher, which is noticeably faster for the
/// small keys used throughout the crate.
pub(crate) type HashMap<K, V> = fnv::FnvHashMap<K, V>;

/// A [`std::collections::HashSet`] with the Fnv hasher.
pub(crate) type HashSet<T> = fnv::FnvHashSet<T>;
