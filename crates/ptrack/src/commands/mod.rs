//! Command handlers, one module per subcommand.

pub mod completion;
pub mod scan;
pub mod version;
