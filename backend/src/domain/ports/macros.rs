//! Helper macro for declaring adapter-facing port error enums.
//!
//! Each variant gets a snake_case constructor whose parameters accept
//! `impl Into<T>`, so adapters can write `CacheError::backend(err.to_string())`
//! or `CacheError::backend("pool exhausted")` interchangeably.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum ProbeError {
            Offline => "probe offline",
            Refused { message: String } => "probe refused: {message}",
            Retries { attempts: u32 } => "gave up after {attempts} attempts",
            Timeout { message: String, millis: u64 } => "{message} after {millis}ms",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(ProbeError::offline().to_string(), "probe offline");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = ProbeError::refused("connection reset");
        assert_eq!(err.to_string(), "probe refused: connection reset");
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        assert_eq!(ProbeError::retries(3_u32).to_string(), "gave up after 3 attempts");
    }

    #[test]
    fn mixed_fields_are_ordered_as_declared() {
        let err = ProbeError::timeout("checkout", 250_u64);
        assert_eq!(err.to_string(), "checkout after 250ms");
    }
}
