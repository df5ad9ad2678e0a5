pub(crate) mod driver;
pub(crate) mod sink;
pub(crate) mod state;
