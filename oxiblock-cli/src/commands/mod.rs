//! Command implementations for OxiBlock CLI.

pub mod compress;
pub mod expand;
pub mod info;
pub mod test;

pub use compress::cmd_compress;
pub use expand::cmd_expand;
pub use info::cmd_info;
pub use test::cmd_test;
