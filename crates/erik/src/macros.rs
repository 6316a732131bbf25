//! Macros that attribute output to the calling module rather than its file

/// Print `"<module> -> <function>"` for the enclosing function
///
/// ```no_run
/// fn connect() {
///     erik::method!(); // prints "my_crate -> connect"
/// }
/// ```
#[macro_export]
macro_rules! method {
    () => {{
        fn __erik_here() {}
        fn __erik_type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let path = __erik_type_name_of(__erik_here);
        let path = path.strip_suffix("::__erik_here").unwrap_or(path);
        $crate::method_from($crate::Frame::from_function_path(
            path,
            ::std::line!(),
            ::std::column!(),
        ))
    }};
}

/// `format!`-style [`print`](crate::print), attributed to `module_path!()`
#[macro_export]
macro_rules! erik_print {
    ($($arg:tt)*) => {
        $crate::print_from(
            $crate::Frame::new(::std::module_path!(), ::std::line!(), ::std::column!()),
            &::std::format!($($arg)*),
        )
    };
}

/// Pretty-print an expression as `"<expr> = <value>"`, attributed to `module_path!()`
#[macro_export]
macro_rules! erik_dump {
    ($value:expr) => {
        $crate::dump_from(
            $crate::Frame::new(::std::module_path!(), ::std::line!(), ::std::column!()),
            ::std::option::Option::Some(::std::stringify!($value)),
            &$value,
        )
    };
}
