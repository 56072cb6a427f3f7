use std::path::Path;
use std::process;

use tap_core::settings::EngineConfig;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn config_export() {
    let toml = die!(
        toml::to_string_pretty(&EngineConfig::default()),
        "Error serializing defaults: {}"
    );
    print!("{toml}");
}

pub fn config_validate(file: &str) {
    let config = die!(
        EngineConfig::from_toml_file(Path::new(file)),
        "Invalid config: {}"
    );
    eprintln!(
        "OK: {} results ({} from cache), depth {}, cache size {}",
        config.num_results,
        config.num_cache_results,
        config.suggestion_depth,
        config.cache_size
    );
}
