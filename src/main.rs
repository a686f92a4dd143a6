use mazepath::{app::App, logging};

fn main() -> std::io::Result<()> {
    let _log_guard = logging::init("mazepath.log");

    let app = App::from_env();
    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = app.run(&mut stdout);
    App::restore_terminal(&mut stdout)?;
    if let Err(e) = &result {
        tracing::error!("App exited with error: {}", e);
    }
    result
}
