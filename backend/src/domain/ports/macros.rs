//! Helper macro for declaring port error enums.
//!
//! Port errors share a shape: a `thiserror` enum whose variants carry a few
//! display-formatted fields, plus snake_case constructors that accept
//! `impl Into<T>` so call sites can pass string literals directly.

macro_rules! port_error {
    (
        $(#[$enum_meta:meta])*
        pub enum $enum_name:ident {
            $(
                $(#[$var_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $text:expr
            ),* $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $enum_name {
            $(
                $(#[$var_meta])*
                #[error($text)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $enum_name {
            $(
                port_error!(@constructor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };

    (@constructor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($( $field: impl Into<$ty> ),*) -> Self {
                Self::$variant { $( $field: $field.into() ),* }
            }
        }
    };
}

pub(crate) use port_error;
