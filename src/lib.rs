pub mod record;
pub mod sink;
pub mod client;
pub mod metadata;

#[cfg(feature = "mongodb")]
pub mod mongo;

pub mod memory_sink;
pub mod noop_sink;

pub mod request;
pub mod response;
pub mod helpers;
pub mod console;
pub mod init;
