pub(crate) mod resample;
pub(crate) mod sizing;
