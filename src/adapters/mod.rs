// Adapters layer: concrete implementations of the publishing ports.

pub mod dry_run;
pub mod wordpress;
pub mod xmlrpc;
