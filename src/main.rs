mod app;
mod config;
mod logger;
mod mqtt;
mod plotter;
mod session;
mod types;

use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::bounded;
use eframe::egui;
use log::{error, info, warn};

use app::DashboardApp;
use config::ConfigManager;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

fn main() {
    logger::init_logger("info");
    info!("Application starting");

    let config_path = env::var("TILTWATCH_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let config = match ConfigManager::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load {}: {}", config_path, e);
            std::process::exit(1);
        }
    };
    match config.config_path() {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => {
            info!("No {} found, using defaults", config_path);
            // 首次运行时写出默认配置，便于用户修改
            match config.get_config().save_to_file(&config_path) {
                Ok(()) => info!("Wrote default configuration to {}", config_path),
                Err(e) => warn!("Could not write default configuration: {}", e),
            }
        }
    }
    let app_config = config.get_config().clone();

    let (event_sender, event_receiver) = bounded(app_config.channels.telemetry_channel_capacity);
    let shutdown_signal = Arc::new(AtomicBool::new(false));

    let mqtt_shutdown = Arc::clone(&shutdown_signal);
    let mqtt_config = app_config.mqtt.clone();
    let request_capacity = app_config.channels.mqtt_request_capacity;
    let mqtt_handle = thread::spawn(move || {
        if let Err(e) = mqtt::run_mqtt_client(mqtt_config, request_capacity, event_sender, mqtt_shutdown) {
            error!("MQTT thread failed: {}", e);
        }
    });

    let window = &app_config.window;
    let options = eframe::NativeOptions {
        vsync: window.vsync,
        hardware_acceleration: if window.hardware_acceleration {
            eframe::HardwareAcceleration::Preferred
        } else {
            eframe::HardwareAcceleration::Off
        },
        renderer: eframe::Renderer::Glow,
        viewport: egui::ViewportBuilder::default()
            .with_title(window.title.clone())
            .with_inner_size([window.width, window.height])
            .with_resizable(window.resizable),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        &window.title,
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(event_receiver, config)))),
    ) {
        error!("GUI failed: {}", e);
        std::process::exit(1);
    }

    // GUI 关闭后，发送关闭信号给 MQTT 线程
    info!("GUI closed, signaling MQTT thread to shutdown");
    shutdown_signal.store(true, Ordering::Relaxed);

    match mqtt_handle.join() {
        Ok(()) => info!("MQTT thread shut down gracefully"),
        Err(e) => error!("MQTT thread panicked: {:?}", e),
    }
}
