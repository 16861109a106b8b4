//! Pre-configured display specifications
//!
//! Common e-ink display templates for Waveshare and Good Display panels.

pub mod gooddisplay;
pub mod waveshare;

pub use gooddisplay::*;
pub use waveshare::*;
