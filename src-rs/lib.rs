#![deny(clippy::all)]

pub mod config;
mod cons;
mod llm;
pub mod session;

// napi symbols only resolve inside a Node host, so the bindings stay out of the test harness
#[cfg(not(test))]
mod ffi;


use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        use log::LevelFilter;
        use log4rs::append::file::FileAppender;
        use log4rs::config::{Appender, Config, Root};
        use log4rs::encode::pattern::PatternEncoder;

        // Try to load log4rs configuration from file first
        let config_path =
            std::env::var("MULTILLM_LOG4RS_CONFIG").unwrap_or_else(|_| "log4rs.yaml".to_string());
        let _ = std::fs::create_dir_all("logs");
        if log4rs::init_file(config_path.clone(), Default::default()).is_ok() {
            println!("[INIT] Logger initialized from {}", config_path);
            return;
        } else {
            println!("[INIT] Failed to load {}, falling back to default config", config_path);
        }

        let pattern = "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}\n";

        let logfile = match FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(pattern)))
            .build("logs/multillm.log")
        {
            Ok(f) => f,
            Err(e) => {
                println!("[INIT] Failed to create log file: {}", e);
                return;
            }
        };

        let config = match Config::builder()
            .appender(Appender::builder().build("logfile", Box::new(logfile)))
            .build(Root::builder().appender("logfile").build(LevelFilter::Debug))
        {
            Ok(c) => c,
            Err(e) => {
                println!("[INIT] Failed to build config: {}", e);
                return;
            }
        };

        match log4rs::init_config(config) {
            Ok(_) => println!("[INIT] Logger initialized successfully"),
            Err(e) => println!("[INIT] Failed to initialize logger: {}", e),
        }
    });
}

#[cfg(not(test))]
#[napi_derive::napi]
pub fn get_app_config() -> String {
    init_logger();
    let config = match config::AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config: {:?}", e);
            return "{}".to_string();
        }
    };
    serde_json::to_string(&config.to_public()).unwrap_or("{}".to_string())
}

#[cfg(not(test))]
pub use ffi::*;
