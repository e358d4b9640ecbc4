use env_logger::Env;
use job_scout::{configuration::get_configuration, startup::run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration()?;

    let count = run(&configuration).await?;
    println!("Updated {} verified job entries", count);

    Ok(())
}
