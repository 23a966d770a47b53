use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = launchpad_api::Args::parse();

	launchpad_api::run(args).await
}
