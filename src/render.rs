pub(crate) mod composite;
pub(crate) mod compositor;
pub(crate) mod frame;
pub(crate) mod paint;
pub(crate) mod preview;
pub(crate) mod session;
pub(crate) mod shape;
pub(crate) mod surface;
