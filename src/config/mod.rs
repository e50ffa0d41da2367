pub(crate) mod render_config;
