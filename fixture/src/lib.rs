//! A tiny library used to exercise hot swapping.
//!
//! Built once plainly and once with `--features second` to get two versions of
//! the same exported symbols.

#[cfg(not(feature = "second"))]
const ANSWER: i32 = 1;
#[cfg(feature = "second")]
const ANSWER: i32 = 2;

#[no_mangle]
pub extern "C" fn answer() -> i32 {
    ANSWER
}

#[no_mangle]
pub extern "C" fn add(a: i32, b: i32) -> i32 {
    a + b
}
