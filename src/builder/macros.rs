//! Macros for ergonomic fragment lists.

/// Build a `Vec<Fragment>` from heterogeneous arguments.
///
/// Each argument goes through `Fragment::from`, so bare strings become
/// transition targets and [`TransitionRecord`](crate::core::TransitionRecord)s
/// become pre-built transitions.
///
/// # Example
///
/// ```
/// use xsfp::builder::{action, guard};
/// use xsfp::core::Fragment;
/// use xsfp::fragments;
///
/// let run = fragments!["active", action("notify"), guard("isReady")];
///
/// assert_eq!(run.len(), 3);
/// assert_eq!(run[0], Fragment::Target("active".to_string()));
/// ```
#[macro_export]
macro_rules! fragments {
    () => {
        ::std::vec::Vec::<$crate::core::Fragment>::new()
    };
    ($($fragment:expr),+ $(,)?) => {
        ::std::vec![$($crate::core::Fragment::from($fragment)),+]
    };
}
