pub mod batch;
pub mod watch;
