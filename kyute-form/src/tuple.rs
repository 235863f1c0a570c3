//! Heterogeneous lists of fields.
//!
//! A form builder accumulates its fields in a tuple: registering a field appends one element, so after `n`
//! registrations the builder holds `(Field<V0, E>, ..., Field<Vn-1, E>)`, with each field keeping its own value
//! type. The tuple is handed to the layout function of the form, which destructures it positionally.

/// Appends an element at the end of a tuple.
pub trait Append<T> {
    type Output;
    fn append(self, item: T) -> Self::Output;
}

macro_rules! impl_append {
    ($($A:ident)*) => {
        impl<$($A,)* T> Append<T> for ($($A,)*) {
            type Output = ($($A,)* T,);

            #[allow(non_snake_case, clippy::unused_unit)]
            fn append(self, item: T) -> Self::Output {
                let ($($A,)*) = self;
                ($($A,)* item,)
            }
        }
    };
}

impl_append!();
impl_append!(A);
impl_append!(A B);
impl_append!(A B C);
impl_append!(A B C D);
impl_append!(A B C D F);
impl_append!(A B C D F G);
impl_append!(A B C D F G H);
impl_append!(A B C D F G H I);
impl_append!(A B C D F G H I J);
impl_append!(A B C D F G H I J K);
impl_append!(A B C D F G H I J K L);
