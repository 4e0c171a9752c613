//! Initialize command.

use console::style;

use crate::config::Settings;

/// Initialize the data directory and database.
pub async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    settings.ensure_directories()?;

    let ctx = settings.create_db_context();
    ctx.init_schema().await?;

    println!(
        "{} Initialized database at {}",
        style("✓").green(),
        settings.database_path().display()
    );
    println!("  Run `perch serve` to start the server");

    Ok(())
}
