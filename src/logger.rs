use chrono::Local;
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

/// Crates whose info-level chatter drowns out the dashboard's own log lines.
const QUIET_CRATES: [&str; 4] = ["rumqttc", "eframe", "egui_glow", "winit"];

fn level_color(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1b[31m\x1b[1m", // 红色
        Level::Warn => "\x1b[33m\x1b[1m",  // 黄色
        Level::Info => "\x1b[32m\x1b[1m",  // 绿色
        Level::Debug => "\x1b[36m\x1b[1m", // 青色
        Level::Trace => "\x1b[90m\x1b[1m", // 灰色
    }
}

/// Initializes the global logger. `RUST_LOG` wins over `default_filter`.
pub fn init_logger(default_filter: &str) {
    let mut builder = Builder::new();
    for name in QUIET_CRATES {
        builder.filter_module(name, LevelFilter::Warn);
    }
    builder
        .parse_filters(default_filter)
        .parse_env(env_logger::Env::default())
        .format(|buf, record| {
            writeln!(
                buf,
                "{}{} {:<5}\x1b[0m [{}:{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                level_color(record.level()),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args(),
            )
        })
        .init();
}
