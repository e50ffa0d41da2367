pub(crate) mod accumulate;
pub(crate) mod frame;
