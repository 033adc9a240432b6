mod dto;
mod export;
mod fetcher;
mod filter;
mod gulf;
mod util;
mod web_interface;

use fetcher::{OpenSkyFetcher, StateSource};
use std::{env, path::PathBuf, process::exit, sync::Arc};
use tracing::{error, info};
use util::{
    config::{load_settings, Settings},
    setup_tracing,
};
use web_interface::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    if let (Some(git_describe), Some(git_sha), Some(build_timestamp)) = (
        option_env!("VERGEN_GIT_DESCRIBE"),
        option_env!("VERGEN_GIT_SHA"),
        option_env!("VERGEN_BUILD_TIMESTAMP"),
    ) {
        info!("Gulfjets {} ({} {})", git_describe, git_sha, build_timestamp);
    }

    let args: Vec<String> = env::args().collect();
    let choice = args.get(1).cloned().unwrap_or_else(|| "web".into());

    let settings = load_settings()?;
    let fetcher = OpenSkyFetcher::new(settings.upstream_url.clone());

    match choice.as_str() {
        "web" => handle_result(start_webserver(&settings, fetcher).await),
        "export" => {
            let path = args
                .get(2)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(&settings.export_file_name));
            handle_result(export_once(&fetcher, path).await)
        }
        _ => println!("Make a valid choice (web, export [PATH])"),
    }

    Ok(())
}

fn handle_result(res: anyhow::Result<()>) {
    if let Err(err) = res {
        error!("An error occurred: {:?}", err);
        exit(1)
    }
}

async fn start_webserver(settings: &Settings, fetcher: OpenSkyFetcher) -> anyhow::Result<()> {
    let state = AppState {
        source: Arc::new(fetcher),
        export_file_name: settings.export_file_name.clone(),
    };
    web_interface::start_server(state, settings.http_addr()).await
}

async fn export_once(source: &dyn StateSource, path: PathBuf) -> anyhow::Result<()> {
    let states = source.fetch_states().await;
    let records = filter::filter_gulf_aircraft(&states, None, None);
    export::save_workbook(&path, &records).await?;
    info!("Exported {} aircraft to {}", records.len(), path.display());
    Ok(())
}
