pub mod exceptions;
pub mod logging;

pub use exceptions::exceptions_middleware;
pub use logging::logging_middleware;
