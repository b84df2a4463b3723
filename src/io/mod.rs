pub mod file_io;

pub use file_io::{open_sink, read_source, restore_mtime, NUL_MARK, STDIN_MARK, STDOUT_MARK};
