pub(crate) mod document;
pub(crate) mod logo;
pub(crate) mod overlay;
pub(crate) mod shape;
