pub mod base_commands;
pub mod catalog_cmd;
pub mod completions_cmd;
pub mod report_format;
pub mod size_cmd;
pub mod size_file_cmd;
