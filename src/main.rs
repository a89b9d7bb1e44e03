use blogdesk::cli::seo::SeoArgs;
use blogdesk::cli::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blogdesk=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { path, name }) => {
            blogdesk::cli::init::run(path, name).await?;
        }
        Some(Commands::Serve { host, port }) => {
            blogdesk::cli::serve::run(&cli.config, host, port).await?;
        }
        Some(Commands::Migrate { command }) => {
            blogdesk::cli::migrate::run(&cli.config, command).await?;
        }
        Some(Commands::User { command }) => {
            blogdesk::cli::user::run(&cli.config, command).await?;
        }
        Some(Commands::Slug { title }) => {
            blogdesk::cli::seo::slug(&title)?;
        }
        Some(Commands::Seo {
            title,
            description,
            keywords,
            content_file,
            json,
        }) => {
            blogdesk::cli::seo::score(SeoArgs {
                title,
                description,
                keywords,
                content_file,
                json,
            })?;
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
