//! Render and play commands: build a page's carousel.

use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::future::BoxFuture;
use recognitions_core::carousel::{
    BuildOptions, CarouselComposer, CarouselTrack, Composition, Durations, PlaybackEngine,
    PlaybackSlide, Scheduler, Stage, SystemClock,
};
use recognitions_core::fetch::HttpClient;
use tracing::{debug, info, warn};
use url::Url;

use super::content_host;
use crate::app_config::FileConfig;
use crate::cli::{CarouselArgs, PlayArgs};

pub async fn run_render_command(args: &CarouselArgs, config: &FileConfig) -> Result<()> {
    let composition = compose_page(args, config).await?;
    let mut track = CarouselTrack::new();
    let update = composition.apply_to(&mut track);
    info!(?update, items = track.len(), "Carousel built");
    println!("{}", track.to_html());
    Ok(())
}

pub async fn run_play_command(args: &PlayArgs, config: &FileConfig) -> Result<()> {
    let composition = compose_page(&args.carousel, config).await?;
    let item_duration = args
        .duration
        .map_or(composition.item_duration, Duration::from_secs);
    let skip_iframe_reload = composition.skip_iframe_reload;

    let mut track = CarouselTrack::new();
    composition.apply_to(&mut track);
    if track.is_empty() {
        warn!(page = %args.carousel.page, "No carousel items to play");
        return Ok(());
    }

    let stage = LogStage {
        video_duration: item_duration,
    };
    let mut engine = PlaybackEngine::new(
        PlaybackSlide::from_track(&track),
        item_duration,
        stage,
        SystemClock,
        Scheduler::default(),
    )
    .with_skip_iframe_reload(skip_iframe_reload);

    let steps = usize::try_from(args.steps).context("steps out of range for usize")?;
    let handled = engine.run(steps).await;
    info!(handled, "Playback finished");
    Ok(())
}

async fn compose_page(args: &CarouselArgs, config: &FileConfig) -> Result<Composition> {
    let host = content_host(args.host.host.as_ref(), config)?;
    let client = HttpClient::new();
    let page_url = client.resolve(&host, &args.page)?;
    let markup = client
        .get_text(&page_url)
        .await
        .with_context(|| format!("Failed to fetch page '{}'", args.page))?;

    let composer = CarouselComposer::new(&client, build_options(config), durations(config))
        .with_fallback_url(
            args.fallback_url
                .clone()
                .or_else(|| config.fallback_dashboard_url.clone()),
        );
    Ok(composer.compose(&markup, &page_url).await)
}

fn build_options(config: &FileConfig) -> BuildOptions {
    let mut options = BuildOptions::default();
    if let Some(image_host) = &config.image_host {
        options.profile_image_host = image_host.as_str().trim_end_matches('/').to_string();
    }
    options
}

fn durations(config: &FileConfig) -> Durations {
    let defaults = Durations::default();
    Durations {
        recognitions: config
            .recognitions_duration_secs
            .map_or(defaults.recognitions, Duration::from_secs),
        dashboards: config
            .dashboards_duration_secs
            .map_or(defaults.dashboards, Duration::from_secs),
        unified: config
            .unified_duration_secs
            .map_or(defaults.unified, Duration::from_secs),
    }
}

/// Logs what a screen would display. Videos "play" for one item duration.
struct LogStage {
    video_duration: Duration,
}

impl Stage for LogStage {
    fn show(&mut self, index: usize) {
        info!(index, "Showing carousel item");
    }

    fn preload(&mut self, index: usize, url: &Url) {
        debug!(index, url = %url, "Reloading upcoming iframe");
    }

    fn play_video(&mut self, index: usize, src: &str) -> BoxFuture<'static, ()> {
        info!(index, src, "Playing video");
        Box::pin(tokio::time::sleep(self.video_duration))
    }

    fn show_nothing(&mut self) {
        info!("No active carousel item");
    }
}
