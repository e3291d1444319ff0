pub(crate) mod archive;
pub(crate) mod batch;
pub(crate) mod png;
