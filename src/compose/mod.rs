//! Right-to-left function composition.
//!
//! [`flow_right`] takes a tuple of functions `(f1, f2, ..., fn)` and returns a
//! [`FlowRight`] which, when called, invokes `fn` with all of the caller's
//! arguments, passes its return value to `fn-1`, and so on leftward. The
//! return value of `f1` is the return value of the call.
//!
//! # Examples
//!
//! ```
//! use flatline::compose::flow_right;
//!
//! let say_hello = |name: &str| format!("Hello, {name}");
//! let add_exclamation = |s: String| s + "!";
//!
//! let greet_enthusiastically = flow_right((add_exclamation, say_hello));
//! assert_eq!(greet_enthusiastically.call(("Omri",)), "Hello, Omri!");
//! ```
//!
//! The rightmost function receives every argument separately:
//!
//! ```
//! use flatline::compose::flow_right;
//!
//! let sum = |a: i32, b: i32, c: i32| a + b + c;
//! let double = |x: i32| x * 2;
//!
//! assert_eq!(flow_right((double, sum)).call((1, 2, 3)), 12);
//! ```

use core::fmt;

pub(crate) mod tuple;

/// Call a function with a tuple of arguments spread into separate parameters.
///
/// Implemented for every `Fn` of up to 12 arguments.
pub trait Apply<Args> {
    /// The function's return type.
    type Output;

    /// Call the function with `args` spread into separate parameters.
    fn apply(&self, args: Args) -> Self::Output;
}

/// A non-empty tuple of functions which can be run right-to-left.
///
/// Implemented for tuples of 1 to 12 functions.
pub trait Chain<Args> {
    /// The return type of the leftmost function.
    type Output;

    /// Run the chain: the rightmost function receives `args`, every other
    /// function receives the return value of the function to its right.
    fn chain(&self, args: Args) -> Self::Output;
}

/// A non-empty tuple of fallible functions which can be run right-to-left,
/// stopping at the first error.
///
/// Implemented for tuples of 1 to 12 functions.
pub trait TryChain<Args> {
    /// The success type of the leftmost function.
    type Ok;
    /// The error type shared by every function in the chain.
    type Error;

    /// Run the chain, short-circuiting on the first `Err`.
    fn try_chain(&self, args: Args) -> Result<Self::Ok, Self::Error>;
}

/// A composition of functions, invoked right-to-left.
///
/// This `struct` is created by the [`flow_right`] function. See its
/// documentation for more.
#[must_use = "a composed function does nothing unless called"]
#[derive(Clone, Copy)]
pub struct FlowRight<Fs> {
    fns: Fs,
}

/// Compose a tuple of functions right-to-left.
///
/// Calling the result runs the rightmost function with the caller's
/// arguments, then feeds each return value into the function to its left.
/// Nothing is memoized: every call re-runs the entire chain.
///
/// If a function panics the panic unwinds immediately and the functions to
/// its left are never invoked.
pub fn flow_right<Fs>(fns: Fs) -> FlowRight<Fs> {
    FlowRight { fns }
}

impl<Fs> FlowRight<Fs> {
    /// Call the composed function.
    ///
    /// `args` is a tuple which is spread into the rightmost function's
    /// parameters, so a single argument is written `(value,)`.
    pub fn call<Args>(&self, args: Args) -> <Fs as Chain<Args>>::Output
    where
        Fs: Chain<Args>,
    {
        self.fns.chain(args)
    }

    /// Call a composition of fallible functions.
    ///
    /// Returns the first `Err` produced. Functions to the left of a failing
    /// function are never invoked.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatline::compose::flow_right;
    ///
    /// let parse = |s: &str| s.parse::<u8>().map_err(|e| e.to_string());
    /// let halve = |n: u8| {
    ///     if n % 2 == 0 { Ok(n / 2) } else { Err(format!("{n} is odd")) }
    /// };
    ///
    /// let parse_and_halve = flow_right((halve, parse));
    /// assert_eq!(parse_and_halve.try_call(("42",)), Ok(21));
    /// assert_eq!(parse_and_halve.try_call(("7",)), Err("7 is odd".to_string()));
    /// ```
    pub fn try_call<Args>(
        &self,
        args: Args,
    ) -> Result<<Fs as TryChain<Args>>::Ok, <Fs as TryChain<Args>>::Error>
    where
        Fs: TryChain<Args>,
    {
        self.fns.try_chain(args)
    }

    /// Consume the composition, returning the tuple of functions.
    pub fn into_inner(self) -> Fs {
        self.fns
    }
}

impl<Fs> fmt::Debug for FlowRight<Fs> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowRight").finish_non_exhaustive()
    }
}
