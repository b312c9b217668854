pub mod sync_parser;
pub mod tab_parser;
