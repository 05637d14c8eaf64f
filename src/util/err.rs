/// Converts errors from their error type (of the submodule) to that of
/// a roadnet::Error variant.
///
/// ```rust,ignore
/// use roadnet::store::TableError;
/// roadnet::impl_err!(TableError, Table);
/// ```
pub mod err_macro {
    #[macro_export]
    macro_rules! impl_err {
        ($from:ty, $variant:ident) => {
            impl From<$from> for $crate::Error {
                fn from(value: $from) -> Self {
                    $crate::Error::$variant(value)
                }
            }
        };
        ($from:ty, $enum:ty, $variant:ident) => {
            impl From<$from> for $enum {
                fn from(value: $from) -> Self {
                    <$enum>::$variant(value)
                }
            }
        };
    }

    pub use impl_err;
}
