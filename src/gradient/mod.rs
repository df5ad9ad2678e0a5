pub(crate) mod color;
pub(crate) mod library;
pub(crate) mod preset_file;
pub(crate) mod profile;
