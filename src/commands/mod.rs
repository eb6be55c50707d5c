pub mod init;
pub mod sort;
