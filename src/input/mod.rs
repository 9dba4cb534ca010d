mod line;
mod parser;

pub use line::LineInputSource;
pub use parser::{calculate_checksum, parse_update, write_update, MAX_LINE_LENGTH};
pub use tracker_core::{InputError, InputSource};
