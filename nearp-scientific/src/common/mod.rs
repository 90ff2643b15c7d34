//! Contains common text reading and writing functionality.

mod text_reader;
pub(crate) use self::text_reader::*;

mod text_writer;
pub use self::text_writer::write_text_solution;

mod variable_writer;
pub use self::variable_writer::write_variable_dump;
