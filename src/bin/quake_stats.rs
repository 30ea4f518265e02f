use quake_stats::utils::logging::init_logging;
use quake_stats::Application;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let app = Application::init()?;
    app.run().await
}
