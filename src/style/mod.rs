pub(crate) mod background;
pub(crate) mod color;
pub(crate) mod command;
pub(crate) mod output;
pub(crate) mod project;
pub(crate) mod style_set;
pub(crate) mod text;
pub(crate) mod transform;
