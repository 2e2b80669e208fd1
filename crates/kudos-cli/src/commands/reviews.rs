//! Reviews command implementation.

use crate::cli::ReviewsArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use kudos_sdk::{AvatarResolver, HttpImageSource, ReviewBoard, ReviewFetcher, SectionView};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Execute the reviews command.
pub async fn execute_reviews(
    args: ReviewsArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let view = load_section(args, config).await?;
    println!("{}", formatter.format_section(&view)?);
    Ok(())
}

/// Fetch the reviews and, unless told not to, wait for every avatar.
pub async fn load_section(args: ReviewsArgs, config: &Config) -> Result<SectionView> {
    let place_id = config.place_id_or(args.place_id)?;
    let proxy_url = args.proxy.unwrap_or_else(|| config.proxy_url.clone());
    let stagger = Duration::from_millis(args.stagger_ms.unwrap_or(config.settings.stagger_ms));

    let resolver = if args.direct {
        AvatarResolver::direct()
    } else {
        AvatarResolver::new()
    };
    let fetcher = ReviewFetcher::new(&proxy_url).with_resolver(resolver);
    let images = Arc::new(HttpImageSource::new(&proxy_url));

    let mut board = ReviewBoard::new(fetcher, images).with_stagger(stagger);
    board.activate(&place_id).await;

    if !args.no_wait {
        debug!("Waiting for {} avatar(s)", board.cards().len());
        board.settle_images().await;
    }

    Ok(board.view())
}
