use super::{Apply, Chain, TryChain};

/// Implements `Apply` for every `Fn` taking the tuple's elements as separate
/// arguments.
macro_rules! impl_apply {
    ($($A:ident)*) => {
        impl<Func, Ret, $($A,)*> Apply<($($A,)*)> for Func
        where
            Func: Fn($($A),*) -> Ret,
        {
            type Output = Ret;

            #[inline]
            #[allow(non_snake_case, clippy::unused_unit)]
            fn apply(&self, ($($A,)*): ($($A,)*)) -> Ret {
                self($($A),*)
            }
        }
    };
}

/// Implements `Chain` and `TryChain` for a tuple of functions.
///
/// The invocation lists the functions right-to-left: first the rightmost
/// function, which receives the caller's arguments, then every function to
/// its left together with the type it takes and the type it returns.
macro_rules! impl_chain_tuple {
    (
        $Last:ident $last_idx:tt => $LastOut:ident
        $(, $F:ident $idx:tt : $In:ident => $Out:ident)*;
        ($($All:ident),+) -> $Ret:ident
    ) => {
        impl<Args, $($All,)+ $LastOut $(, $Out)*> Chain<Args> for ($($All,)+)
        where
            $Last: Apply<Args, Output = $LastOut>,
            $($F: Fn($In) -> $Out,)*
        {
            type Output = $Ret;

            #[inline]
            fn chain(&self, args: Args) -> $Ret {
                let value = self.$last_idx.apply(args);
                $(let value = (self.$idx)(value);)*
                value
            }
        }

        impl<Args, E, $($All,)+ $LastOut $(, $Out)*> TryChain<Args> for ($($All,)+)
        where
            $Last: Apply<Args, Output = Result<$LastOut, E>>,
            $($F: Fn($In) -> Result<$Out, E>,)*
        {
            type Ok = $Ret;
            type Error = E;

            #[inline]
            fn try_chain(&self, args: Args) -> Result<$Ret, E> {
                let value = self.$last_idx.apply(args)?;
                $(let value = (self.$idx)(value)?;)*
                Ok(value)
            }
        }
    };
}

impl_apply! {  }
impl_apply! { A0 }
impl_apply! { A0 A1 }
impl_apply! { A0 A1 A2 }
impl_apply! { A0 A1 A2 A3 }
impl_apply! { A0 A1 A2 A3 A4 }
impl_apply! { A0 A1 A2 A3 A4 A5 }
impl_apply! { A0 A1 A2 A3 A4 A5 A6 }
impl_apply! { A0 A1 A2 A3 A4 A5 A6 A7 }
impl_apply! { A0 A1 A2 A3 A4 A5 A6 A7 A8 }
impl_apply! { A0 A1 A2 A3 A4 A5 A6 A7 A8 A9 }
impl_apply! { A0 A1 A2 A3 A4 A5 A6 A7 A8 A9 A10 }
impl_apply! { A0 A1 A2 A3 A4 A5 A6 A7 A8 A9 A10 A11 }

impl_chain_tuple! { F0 0 => R0; (F0) -> R0 }
impl_chain_tuple! { F1 1 => R1, F0 0: R1 => R0; (F0, F1) -> R0 }
impl_chain_tuple! { F2 2 => R2, F1 1: R2 => R1, F0 0: R1 => R0; (F0, F1, F2) -> R0 }
impl_chain_tuple! { F3 3 => R3, F2 2: R3 => R2, F1 1: R2 => R1, F0 0: R1 => R0; (F0, F1, F2, F3) -> R0 }
impl_chain_tuple! { F4 4 => R4, F3 3: R4 => R3, F2 2: R3 => R2, F1 1: R2 => R1, F0 0: R1 => R0; (F0, F1, F2, F3, F4) -> R0 }
impl_chain_tuple! { F5 5 => R5, F4 4: R5 => R4, F3 3: R4 => R3, F2 2: R3 => R2, F1 1: R2 => R1, F0 0: R1 => R0; (F0, F1, F2, F3, F4, F5) -> R0 }
impl_chain_tuple! { F6 6 => R6, F5 5: R6 => R5, F4 4: R5 => R4, F3 3: R4 => R3, F2 2: R3 => R2, F1 1: R2 => R1, F0 0: R1 => R0; (F0, F1, F2, F3, F4, F5, F6) -> R0 }
impl_chain_tuple! { F7 7 => R7, F6 6: R7 => R6, F5 5: R6 => R5, F4 4: R5 => R4, F3 3: R4 => R3, F2 2: R3 => R2, F1 1: R2 => R1, F0 0: R1 => R0; (F0, F1, F2, F3, F4, F5, F6, F7) -> R0 }
impl_chain_tuple! { F8 8 => R8, F7 7: R8 => R7, F6 6: R7 => R6, F5 5: R6 => R5, F4 4: R5 => R4, F3 3: R4 => R3, F2 2: R3 => R2, F1 1: R2 => R1, F0 0: R1 => R0; (F0, F1, F2, F3, F4, F5, F6, F7, F8) -> R0 }
impl_chain_tuple! { F9 9 => R9, F8 8: R9 => R8, F7 7: R8 => R7, F6 6: R7 => R6, F5 5: R6 => R5, F4 4: R5 => R4, F3 3: R4 => R3, F2 2: R3 => R2, F1 1: R2 => R1, F0 0: R1 => R0; (F0, F1, F2, F3, F4, F5, F6, F7, F8, F9) -> R0 }
impl_chain_tuple! { F10 10 => R10, F9 9: R10 => R9, F8 8: R9 => R8, F7 7: R8 => R7, F6 6: R7 => R6, F5 5: R6 => R5, F4 4: R5 => R4, F3 3: R4 => R3, F2 2: R3 => R2, F1 1: R2 => R1, F0 0: R1 => R0; (F0, F1, F2, F3, F4, F5, F6, F7, F8, F9, F10) -> R0 }
impl_chain_tuple! { F11 11 => R11, F10 10: R11 => R10, F9 9: R10 => R9, F8 8: R9 => R8, F7 7: R8 => R7, F6 6: R7 => R6, F5 5: R6 => R5, F4 4: R5 => R4, F3 3: R4 => R3, F2 2: R3 => R2, F1 1: R2 => R1, F0 0: R1 => R0; (F0, F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11) -> R0 }
