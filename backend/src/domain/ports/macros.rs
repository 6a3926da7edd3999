//! Helper macro for declaring port error enums with ergonomic constructors.

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
    //! Regression coverage for this module.
    define_port_error! {
        pub enum ProbePortError {
            Rejected { reason: String } => "rejected: {reason}",
            Status { status: u16 } => "unexpected status {status}",
            Failed { message: String, status: u16 } => "failed: {message} ({status})",
            Closed => "closed",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ProbePortError::rejected("EMAIL_EXISTS");
        assert_eq!(err.to_string(), "rejected: EMAIL_EXISTS");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = ProbePortError::status(503_u16);
        assert_eq!(err.to_string(), "unexpected status 503");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = ProbePortError::failed("timeout", 504_u16);
        assert_eq!(err.to_string(), "failed: timeout (504)");
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(ProbePortError::closed(), ProbePortError::Closed);
    }
}
