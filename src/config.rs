use confique::Config as _;
use std::sync::OnceLock;

#[derive(confique::Config)]
pub struct Config {
    /// Dialect forced for every session (exact lowercase name), bypassing
    /// product-name resolution.
    #[config(env = "QLINE_DIALECT")]
    pub dialect: Option<String>,
    /// Extra keyword file: a single comma-separated line merged into the
    /// default keyword set on first load.
    #[config(env = "QLINE_KEYWORDS_FILE")]
    pub keywords_file: Option<String>,
    #[cfg(test)]
    #[config(env = "QLINE_CONTAINER_RAMDISKED", default = true)]
    pub container_ramdisked: bool,
    #[cfg(test)]
    #[config(env = "QLINE_CONTAINER_LOGS", default = false)]
    pub container_logs: bool,
}

pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        Config::builder()
            .env()
            .load()
            .expect("Failed to load one or more value configuration from the current environment")
    })
}
