pub(crate) mod audio;
pub(crate) mod slot;
pub(crate) mod source;
pub(crate) mod video;
