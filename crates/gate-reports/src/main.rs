mod bootstrap;

use anyhow::{bail, Context, Result};
use gate_core::settings::Settings;
use gate_data::aggregator::DisplayOptions;
use gate_runtime::report_session::{FileLogSource, ReportSession, FETCH_FAILED_MESSAGE};
use gate_ui::app::{App, Screen};
use gate_ui::plain::{render_employee_list, render_plain};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;

    // The TUI owns stdout/stderr, so it logs to a file unless told otherwise.
    let log_file = settings
        .log_file
        .clone()
        .or_else(|| (settings.output == "table").then(bootstrap::default_log_file));
    bootstrap::setup_logging(&settings.log_level, log_file.as_ref())?;

    tracing::info!("Gate Reports v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Output: {}, Timezone: {}, Theme: {}",
        settings.output,
        settings.timezone,
        settings.theme
    );

    let data_path = settings
        .data_path
        .clone()
        .or_else(bootstrap::discover_data_path)
        .context("no export directory found; pass --data-path")?;
    tracing::info!(path = %data_path.display(), "using export data");

    let options = DisplayOptions {
        timezone: settings.display_timezone(),
        use_12h: settings.use_12h(),
    };
    let session = ReportSession::new(FileLogSource::new(data_path), options);

    if settings.list_employees {
        let employees = session.employees().await?;
        print!("{}", render_employee_list(&employees));
        return Ok(());
    }

    let Some(employee_id) = settings.employee else {
        bail!("no employee selected; pass --employee <id> or --list-employees");
    };

    let report = session.select(employee_id).await;

    match settings.output.as_str() {
        "json" => match report {
            Some(report) => println!("{}", serde_json::to_string_pretty(&report)?),
            None => bail!(failure_message(&session).await),
        },
        "plain" => match report {
            Some(report) => print!("{}", render_plain(&report)),
            None => bail!(failure_message(&session).await),
        },
        _ => {
            let screen = match report {
                Some(report) => Screen::Report(report),
                None => Screen::Message(failure_message(&session).await),
            };
            App::new(&settings.theme, screen).run()?;
        }
    }

    Ok(())
}

async fn failure_message(session: &ReportSession<FileLogSource>) -> String {
    session
        .last_error()
        .await
        .unwrap_or_else(|| FETCH_FAILED_MESSAGE.to_string())
}
