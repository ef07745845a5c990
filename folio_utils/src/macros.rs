/// Asserts that an expression matches a pattern.
///
/// Besides the plain `pattern` and `pattern if guard` forms, a block can be
/// given after `=>` which is evaluated with the bindings of the pattern:
///
/// ```rust
/// # use folio_utils::assert_matches;
/// let value: Result<u16, String> = Ok(200);
/// assert_matches!(value, Ok(status) => assert_eq!(status, 200));
/// ```
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat => $body:expr) => {
        match ($expr) {
            $pat => $body,
            val => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    };
    ($expr:expr, $pat:pat if $pred:expr) => {{
        let val = $expr;
        match (&val) {
            $pat if $pred => (),
            #[allow(unused_variables, reason = "bindings are only read by the guard")]
            $pat => ::core::panic!(
                "Assertion failed: Value {val:?} does not match predicate {}",
                ::core::stringify!($pred)
            ),
            _ => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    }};
    ($expr:expr, $pat:pat) => {
        $crate::assert_matches!($expr, $pat => ())
    };
}
