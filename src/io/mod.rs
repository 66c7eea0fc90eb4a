pub mod config_io;
pub mod lock;
pub mod paths;
pub mod storage;
