//! Entry point: logging setup and platform dispatch.

use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    #[cfg(target_os = "windows")]
    deskpins::platform::windows::run();

    #[cfg(not(target_os = "windows"))]
    eprintln!("deskpins: the options UI is Windows-only; the core library builds and tests everywhere");
}
