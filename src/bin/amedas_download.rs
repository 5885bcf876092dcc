use amedas::{Amedas, AmedasFetcher, RunConfig, StationRegistry};
use argh::FromArgs;
use std::path::PathBuf;

#[derive(FromArgs)]
/// Download AMeDAS observation pages into a local raw_html/ cache
struct Args {
    /// path to the run configuration (YAML)
    #[argh(option, short = 'c', default = "PathBuf::from(\"target.yaml\")")]
    config: PathBuf,

    /// path to the tab-separated station list
    #[argh(option, short = 's', default = "PathBuf::from(\"AMeDAS_list.csv\")")]
    stations: PathBuf,

    /// re-download pages that are already cached
    #[argh(switch, short = 'f')]
    force: bool,
}

#[tokio::main]
async fn main() {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let args: Args = argh::from_env();

    let config = match RunConfig::from_file(&args.config) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config from '{}': {}", args.config.display(), e);
            std::process::exit(1);
        }
    };

    let registry = match StationRegistry::load(&args.stations) {
        Ok(r) => r,
        Err(e) => {
            log::error!("Failed to load station list: {}", e);
            std::process::exit(1);
        }
    };

    log::info!(
        "Downloading {} to {} for {} station(s), {} .. {}{}",
        config.resolutions.join(", "),
        config.cache_dir.display(),
        config.targets.len(),
        config.start_date,
        config.end_date,
        if args.force { " (forced)" } else { "" }
    );

    let amedas = Amedas::new(registry, AmedasFetcher::new(&config.cache_dir));
    let summary = amedas.download(&config, args.force).await;

    if summary.downloaded == 0 && summary.no_data > 0 {
        log::warn!("No page could be downloaded in this run");
    }
}
