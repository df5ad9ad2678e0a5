pub(crate) mod synth;
pub(crate) mod tile;
pub(crate) mod wave;
