pub(crate) mod schema;
pub(crate) mod store;
