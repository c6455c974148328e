pub mod init;
pub mod scan;
