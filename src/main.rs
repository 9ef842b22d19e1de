use anyhow::{anyhow, Context};
use prodcon::{Pipeline, CONFIG};
use tracing::info;

fn main() -> anyhow::Result<()> {
    prodcon::init_tracing().map_err(|e| anyhow!(e))?;

    let pipeline = Pipeline::new(*CONFIG);
    let report = pipeline
        .run(std::io::stdout())
        .with_context(|| format!("Pipeline failed with {:?}", pipeline.config()))?;

    info!("Done. Consumer observed {} items.", report.items);
    Ok(())
}
