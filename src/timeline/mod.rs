pub(crate) mod keyframe;
pub(crate) mod model;
pub(crate) mod schema;
