//! Formatting macros that skip `format!` entirely when the level is filtered out
//! and record the calling function for `%{shortfunc}`.

/// Path of the function the macro is expanded in.
#[doc(hidden)]
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __f() {}
        $crate::logger::trim_function_name(::std::any::type_name_of_val(&__f))
    }};
}

/// `log!(logger, Level::Notice, "cache warmed in {} ms", ms)`
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger: &$crate::Logger = &$logger;
        let level: $crate::Level = $level;
        if logger.is_enabled_for(level) {
            logger.log_from(level, &::std::format!($($arg)+), $crate::function_name!());
        }
    }};
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => { $crate::log!($logger, $crate::Level::Debug, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => { $crate::log!($logger, $crate::Level::Info, $($arg)+) };
}

#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => { $crate::log!($logger, $crate::Level::Notice, $($arg)+) };
}

#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => { $crate::log!($logger, $crate::Level::Warning, $($arg)+) };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => { $crate::log!($logger, $crate::Level::Error, $($arg)+) };
}

#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => { $crate::log!($logger, $crate::Level::Critical, $($arg)+) };
}
