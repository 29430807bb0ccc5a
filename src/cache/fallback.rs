//! Fallback Module
//!
//! Lets the memoizing reads accept computations of zero to five arguments
//! through one generic entry point.

// == Fallback ==
/// A computation invoked with an argument tuple on a cache miss.
///
/// Implemented for every `FnOnce` taking up to five arguments, with the
/// arguments packed as a tuple: `()` for none, `(a,)` for one, and so on.
pub trait Fallback<Args> {
    type Output;

    fn call(self, args: Args) -> Self::Output;
}

macro_rules! impl_fallback {
    ($($arg:ident),*) => {
        impl<Func, Out, $($arg),*> Fallback<($($arg,)*)> for Func
        where
            Func: FnOnce($($arg),*) -> Out,
        {
            type Output = Out;

            #[allow(non_snake_case)]
            fn call(self, ($($arg,)*): ($($arg,)*)) -> Out {
                self($($arg),*)
            }
        }
    };
}

impl_fallback!();
impl_fallback!(A1);
impl_fallback!(A1, A2);
impl_fallback!(A1, A2, A3);
impl_fallback!(A1, A2, A3, A4);
impl_fallback!(A1, A2, A3, A4, A5);
