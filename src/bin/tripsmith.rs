use tripsmith::app;
use tripsmith::config::{load_settings, resolve_state_root};

fn run() -> Result<(), String> {
    let state_root = resolve_state_root().map_err(|err| err.to_string())?;
    let settings = load_settings(&state_root).map_err(|err| err.to_string())?;
    app::run(&settings, &state_root)
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
