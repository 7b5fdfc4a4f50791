pub(crate) mod apply;
pub(crate) mod ops;
pub(crate) mod set;
