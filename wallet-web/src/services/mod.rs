//! Browser implementations of the wallet core's seams

pub mod nintondo;
pub mod runtime;

pub use nintondo::BrowserCapabilities;
pub use runtime::BrowserRuntime;
