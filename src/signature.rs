//! Call signatures a dynamically loaded function can have.

/// A function-pointer type that can be resolved from a library and called with
/// its arguments packed in a tuple.
///
/// Implemented for `fn(..) -> R` and `extern "C" fn(..) -> R` with up to six
/// arguments. `unsafe fn` pointers are left out on purpose so calling through a
/// [`DynFunction`](crate::DynFunction) stays a safe operation.
pub trait Signature: Copy {
    type Args;
    type Output;

    fn invoke(self, args: Self::Args) -> Self::Output;
}

macro_rules! impl_signature {
    ($($arg:ident),*) => {
        impl<R $(, $arg)*> Signature for fn($($arg),*) -> R {
            type Args = ($($arg,)*);
            type Output = R;

            #[inline]
            #[allow(non_snake_case)]
            fn invoke(self, ($($arg,)*): Self::Args) -> R {
                (self)($($arg),*)
            }
        }

        impl<R $(, $arg)*> Signature for extern "C" fn($($arg),*) -> R {
            type Args = ($($arg,)*);
            type Output = R;

            #[inline]
            #[allow(non_snake_case)]
            fn invoke(self, ($($arg,)*): Self::Args) -> R {
                (self)($($arg),*)
            }
        }
    };
}

impl_signature!();
impl_signature!(A1);
impl_signature!(A1, A2);
impl_signature!(A1, A2, A3);
impl_signature!(A1, A2, A3, A4);
impl_signature!(A1, A2, A3, A4, A5);
impl_signature!(A1, A2, A3, A4, A5, A6);

#[cfg(test)]
mod tests {
    use super::Signature;

    fn seven() -> i32 {
        7
    }

    extern "C" fn mul(a: i32, b: i32) -> i32 {
        a * b
    }

    fn join(a: &'static str, b: char, c: u8) -> String {
        format!("{a}{b}{c}")
    }

    #[test]
    fn invokes_with_packed_arguments() {
        let f: fn() -> i32 = seven;
        assert_eq!(f.invoke(()), 7);

        let f: extern "C" fn(i32, i32) -> i32 = mul;
        assert_eq!(f.invoke((6, 7)), 42);

        let f: fn(&'static str, char, u8) -> String = join;
        assert_eq!(f.invoke(("a", '-', 3)), "a-3");
    }

    #[test]
    fn unit_return() {
        fn nothing(_: u64) {}
        let f: fn(u64) = nothing;
        f.invoke((1,));
    }
}
