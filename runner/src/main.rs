use std::process;

use maze::{MazeConfig, StopFlag};

fn main() {
    env_logger::init();

    let stop = StopFlag::new();
    let handle = stop.clone();
    ctrlc::set_handler(move || {
        eprintln!("Stopping...");
        handle.request();
    })
    .expect("error setting Ctrl-C handler");

    let config = match MazeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}.", e);
            process::exit(2);
        }
    };

    if let Err(e) = runner::run(&config, &stop) {
        eprintln!("Error: {}.", e);
        process::exit(1);
    }
}
