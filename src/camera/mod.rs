pub(crate) mod effects;
pub(crate) mod grid;
pub(crate) mod pose;
