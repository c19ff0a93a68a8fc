mod bootstrap;

use anyhow::Result;
use bikeshare_core::settings::Settings;
use bikeshare_runtime::session::{DirectorySource, Session};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Bikeshare explorer v{} starting", env!("CARGO_PKG_VERSION"));

    let data_dir = bootstrap::resolve_data_dir(settings.data_dir.as_deref())?;
    tracing::info!(
        "Data directory: {}, page size: {}",
        data_dir.display(),
        settings.page_size()
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(
        stdin.lock(),
        stdout.lock(),
        DirectorySource::new(data_dir),
        settings.page_size(),
    );
    session.run()?;

    tracing::info!("Session finished");
    Ok(())
}
