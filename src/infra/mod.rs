// Infrastructure adapters for the application ports

pub mod json_file_adapter;
