use std::fs::File;

use gridsnake::app::{run_guarded, SnakeApp};
use gridsnake::config::{GameConfig, LOG_FILE, LOG_LEVEL};
use gridsnake::error::Result;
use simplelog::{Config, WriteLogger};

fn main() {
    if let Err(e) = run() {
        eprintln!("gridsnake: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // The terminal is taken over by the game, so logs go to a file
    WriteLogger::init(LOG_LEVEL, Config::default(), File::create(LOG_FILE)?)?;
    log::info!("starting gridsnake");

    let mut game = SnakeApp::new(GameConfig::default())?;

    // The terminal is put back even when setting it up only got halfway
    let result = run_guarded(&mut game, SnakeApp::initialize, SnakeApp::run, SnakeApp::shutdown);

    if let Err(e) = &result {
        log::error!("exiting on error: {}", e);
    }
    result
}
