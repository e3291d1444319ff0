pub(crate) mod background;
pub(crate) mod compositor;
pub(crate) mod fingerprint;
pub(crate) mod mockup;
pub(crate) mod screenshot;
pub(crate) mod surface;
pub(crate) mod text;
