#![warn(clippy::pedantic)]
// Noisy doc/signature lints — would require annotating most pub functions
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
// Style preference — keeping format!("{}", x) over format!("{x}") for readability with complex exprs
#![allow(clippy::uninlined_format_args)]
// Module structure — bot::BotState, gemini::GeminiClient etc. read better with the prefix
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod gemini;
pub(crate) mod utils;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
