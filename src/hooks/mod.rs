//! One module per lifecycle hook. Each takes the raw stdin payload and
//! returns the exit code and stdout for the host.

pub mod post_tool_use;
pub mod pre_tool_use;
pub mod session_start;
pub mod stop;
pub mod user_prompt;
