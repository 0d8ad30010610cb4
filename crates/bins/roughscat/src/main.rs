#![warn(clippy::all, rust_2021_compatibility)]

mod app;
mod error;

fn main() {
    if let Err(err) = app::run() {
        log::error!("{}", err);
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
