use snafu::prelude::*;

/// Error of the [Strip](crate::Strip) constructors.
///
/// The driver did not report success while initializing the hardware.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(display("ws2811_init failed with code {code} ({message})"))]
pub struct InitializationError {
    /// The raw status code returned by the driver.
    pub code: i32,
    /// The driver's description of the status code.
    pub message: &'static str,
}

/// Errors of the [Strip::show](crate::Strip::show) function
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RenderError {
    /// The driver did not report success while rendering.
    #[snafu(display("ws2811_render failed with code {code} ({message})"))]
    Driver {
        /// The raw status code returned by the driver.
        code: i32,
        /// The driver's description of the status code.
        message: &'static str,
    },
    /// The strip was already torn down.
    #[snafu(display("the strip was already torn down"))]
    Released,
}

/// Errors of [StripBuilder::from_env](crate::StripBuilder::from_env).
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    /// An environment variable holds a value that could not be parsed.
    #[snafu(display("unable to parse environment variable {variable}: '{value}'"))]
    InvalidValue {
        /// The name of the variable.
        variable: &'static str,
        /// The value it holds.
        value: String,
    },
}
