pub(crate) mod card;
pub(crate) mod chrome;
pub(crate) mod connector;
pub(crate) mod frame;
pub(crate) mod icon;
pub(crate) mod painter;
