//! Filesystem and stream utilities: directory lifecycle, streaming line
//! I/O, byte/line counting, batch filename encoding.

mod files;

pub use files::{
    count_bytes_and_lines, hex_width, line_stream, make_empty_dir, open_file_r, read_lines,
    remove_dir, size_of_line, sync_write, BatchFileName,
};
