// Resume text → structured sections. The parser is total: any text yields a
// `ParsedResume` with all seven canonical sections present.

pub mod headers;
pub mod model;
pub mod parser;
pub mod patterns;

pub use model::{ParsedResume, SectionBody, SectionKey};
pub use parser::parse;
