pub mod init;
pub mod rewrite;
