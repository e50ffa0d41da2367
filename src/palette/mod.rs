pub(crate) mod charsets;
#[allow(clippy::module_inception)]
pub(crate) mod palette;
