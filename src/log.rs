//! Diagnostic output.
//!
//! With the `esp32-log` feature enabled messages go to the serial console via
//! `esp-println`. Without it the macro expands to nothing, but the format
//! arguments are still type-checked.

#[cfg(feature = "esp32-log")]
macro_rules! log {
    ($($arg:tt)*) => {
        esp_println::println!($($arg)*)
    };
}

#[cfg(not(feature = "esp32-log"))]
macro_rules! log {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

pub(crate) use log;
