//! Integration tests for carousel building, composition and playback.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use futures_util::future::BoxFuture;
use recognitions_core::carousel::{
    BuildOptions, BuildOutcome, CarouselBuilder, CarouselComposer, CarouselTrack, Clock,
    Durations, ItemMedia, PlaybackEngine, PlaybackSlide, Scheduler, SheetSource, Stage,
    TrackUpdate,
};
use recognitions_core::markup::{BlockKind, SheetRowDescriptor, extract_sheet_rows};
use recognitions_core::sheet::{SheetEntry, SheetError};
use url::Url;

/// Serves sheets from memory and records the order they were requested in.
#[derive(Default)]
struct MemorySheets {
    sheets: HashMap<String, Vec<SheetEntry>>,
    requested: Mutex<Vec<String>>,
}

impl MemorySheets {
    fn with(mut self, path: &str, entries: Vec<SheetEntry>) -> Self {
        self.sheets.insert(path.to_string(), entries);
        self
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl SheetSource for MemorySheets {
    async fn fetch_sheet(&self, url: &Url) -> Result<Vec<SheetEntry>, SheetError> {
        self.requested.lock().unwrap().push(url.path().to_string());
        self.sheets
            .get(url.path())
            .cloned()
            .ok_or_else(|| SheetError::invalid_type("multi-sheet"))
    }
}

struct FixedClock(NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

fn june_15() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

#[derive(Default)]
struct RecordingStage {
    shown: Vec<usize>,
    preloaded: Vec<usize>,
}

impl Stage for RecordingStage {
    fn show(&mut self, index: usize) {
        self.shown.push(index);
    }

    fn preload(&mut self, index: usize, _url: &Url) {
        self.preloaded.push(index);
    }

    fn play_video(&mut self, _index: usize, _src: &str) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(Duration::from_secs(1)))
    }

    fn show_nothing(&mut self) {}
}

fn base() -> Url {
    Url::parse("https://main--screens--org.hlx.live/content/screens/lobby").unwrap()
}

fn row(sheet: &str, team: Option<&str>) -> SheetRowDescriptor {
    SheetRowDescriptor {
        link: base().join(sheet).unwrap(),
        background: r#"<picture><img src="./media_bg.png"></picture>"#.to_string(),
        team_name: team.map(str::to_string),
    }
}

fn entry(pairs: &[(&str, &str)]) -> SheetEntry {
    SheetEntry::from_pairs(pairs.iter().copied())
}

#[tokio::test]
async fn test_items_follow_row_order_and_skip_bad_entries() {
    let sheets = MemorySheets::default()
        .with(
            "/content/org-a/recognitions.json",
            vec![
                entry(&[("LDAP", "jdoe"), ("Name", "Jane Doe"), ("Description", "Shipped")]),
                entry(&[("LDAP", "nobody")]),
            ],
        )
        .with(
            "/content/org-b/recognitions.json",
            vec![entry(&[
                ("Image URL", "https://cdn.example/content/media_team.png?width=750"),
                ("Description", "Quarter wrap"),
                ("Heading", "No Heading"),
                ("End Date", "31/12/2024"),
            ])],
        );
    let rows = vec![
        row("/content/org-a/recognitions.json", Some("Team A")),
        row("/content/org-b/recognitions.json", None),
    ];

    let outcome = CarouselBuilder::new(&sheets, BuildOptions::default())
        .build(&rows)
        .await;

    assert_eq!(
        sheets.requested(),
        ["/content/org-a/recognitions.json", "/content/org-b/recognitions.json"]
    );
    let BuildOutcome::Items(items) = outcome else {
        panic!("expected items, got {outcome:?}");
    };
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].images, ["https://s7d2.scene7.com/is/image/IMGDIR/jdoe"]);
    assert_eq!(items[0].heading.as_deref(), Some("Congratulations"));
    assert_eq!(items[0].title.as_deref(), Some("Team A"));
    assert_eq!(items[1].images, ["/media_team.png"]);
    assert_eq!(items[1].heading, None);
    assert_eq!(items[1].end_date.as_deref(), Some("31/12/2024"));
}

#[tokio::test]
async fn test_no_rows_builds_empty() {
    let sheets = MemorySheets::default();
    let outcome = CarouselBuilder::new(&sheets, BuildOptions::default())
        .build(&[])
        .await;
    assert_eq!(outcome, BuildOutcome::Empty);
    assert!(sheets.requested().is_empty());
}

#[tokio::test]
async fn test_all_sheets_failing_keeps_previous_track() {
    let sheets = MemorySheets::default().with(
        "/content/org-a/recognitions.json",
        vec![entry(&[("LDAP", "jdoe"), ("Description", "Shipped")])],
    );
    let builder = CarouselBuilder::new(&sheets, BuildOptions::default());

    let mut track = CarouselTrack::new();
    let first = builder
        .build(&[row("/content/org-a/recognitions.json", None)])
        .await;
    assert_eq!(track.apply(first), TrackUpdate::Replaced(1));

    let failed = builder
        .build(&[
            row("/content/org-x/recognitions.json", None),
            row("/content/org-y/recognitions.json", None),
        ])
        .await;
    assert_eq!(failed, BuildOutcome::Failed { failed_sheets: 2 });
    assert_eq!(track.apply(failed), TrackUpdate::Kept);
    assert_eq!(track.len(), 1);

    let partial = builder
        .build(&[
            row("/content/org-x/recognitions.json", None),
            row("/content/org-a/recognitions.json", None),
        ])
        .await;
    assert_eq!(partial.len(), 1);
}

#[tokio::test]
async fn test_sheet_without_valid_rows_keeps_previous_track() {
    let sheets = MemorySheets::default()
        .with(
            "/content/org-a/recognitions.json",
            vec![entry(&[("LDAP", "jdoe"), ("Description", "Shipped")])],
        )
        .with(
            "/content/org-b/recognitions.json",
            vec![entry(&[
                ("LDAP", "jdoe"),
                ("Description", "Shipped"),
                ("End Date", "2024-12-31"),
            ])],
        );
    let builder = CarouselBuilder::new(&sheets, BuildOptions::default());

    let mut track = CarouselTrack::new();
    let first = builder
        .build(&[row("/content/org-a/recognitions.json", None)])
        .await;
    assert_eq!(track.apply(first), TrackUpdate::Replaced(1));

    let broken = builder
        .build(&[row("/content/org-b/recognitions.json", None)])
        .await;
    assert_eq!(broken, BuildOutcome::Empty);
    assert_eq!(track.apply(broken), TrackUpdate::Kept);
    assert_eq!(track.len(), 1);
}

const LOBBY: &str = r#"<html><body><main>
  <div class="carousel recognitions">
    <div>
      <div><picture><img src="./media_bg.png"></picture></div>
      <div><a href="/content/org-a/recognitions.json">sheet</a></div>
      <div>Team A</div>
    </div>
  </div>
  <div class="carousel dashboards">
    <div>
      <div><picture><img src="./media_chart.png?width=750"></picture></div>
      <div>1/1/2024</div>
      <div>31/12/2030</div>
    </div>
    <div>
      <div><a href="https://dash.example/sales">Sales</a></div>
    </div>
  </div>
</main></body></html>"#;

#[tokio::test]
async fn test_extracted_rows_feed_the_builder() {
    let rows = extract_sheet_rows(LOBBY, BlockKind::Recognitions, &base());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].team_name.as_deref(), Some("Team A"));

    let sheets = MemorySheets::default().with(
        "/content/org-a/recognitions.json",
        vec![entry(&[("LDAP", "jdoe"), ("Description", "Shipped")])],
    );
    let outcome = CarouselBuilder::new(&sheets, BuildOptions::default())
        .build(&rows)
        .await;
    assert_eq!(outcome.len(), 1);
}

#[tokio::test]
async fn test_unified_composition_tags_items_and_uses_unified_duration() {
    let sheets = MemorySheets::default().with(
        "/content/org-a/recognitions.json",
        vec![entry(&[
            ("LDAP", "jdoe"),
            ("Description", "Shipped"),
            ("Start Date", "1/6/2024"),
        ])],
    );
    let composition = CarouselComposer::new(&sheets, BuildOptions::default(), Durations::default())
        .compose(LOBBY, &base())
        .await;

    assert_eq!(composition.items.len(), 3);
    assert_eq!(composition.item_duration, Duration::from_secs(15));
    assert_eq!(composition.skipped_blocks, 1);
    assert!(!composition.skip_iframe_reload);
    assert_eq!(composition.items[0].provenance(), Some(BlockKind::Recognitions));
    assert_eq!(composition.items[0].start_date(), Some("1/6/2024"));
    assert_eq!(composition.items[1].provenance(), Some(BlockKind::Dashboards));
    assert_eq!(composition.items[1].end_date(), Some("31/12/2030"));
    assert!(matches!(composition.items[2].media(), ItemMedia::Iframe(url) if url.host_str() == Some("dash.example")));

    let mut track = CarouselTrack::new();
    assert_eq!(composition.apply_to(&mut track), TrackUpdate::Replaced(3));
    let html = track.to_html();
    assert!(html.starts_with(r#"<div class="carousel-track">"#));
    assert!(html.contains(r#"<div class="carousel-item recognitions" start-date="1/6/2024" end-date="">"#));
    assert!(html.contains(r#"class="carousel-item dashboards" start-date="1/1/2024" end-date="31/12/2030""#));
}

#[tokio::test]
async fn test_empty_page_falls_back_to_dashboard_iframe() {
    let sheets = MemorySheets::default();
    let fallback = Url::parse("https://dash.example/overview").unwrap();
    let composition = CarouselComposer::new(&sheets, BuildOptions::default(), Durations::default())
        .with_fallback_url(Some(fallback.clone()))
        .compose("<html><body><main><p>empty</p></main></body></html>", &base())
        .await;

    assert_eq!(composition.items.len(), 1);
    assert_eq!(composition.items[0].media(), &ItemMedia::Iframe(fallback));
    assert_eq!(composition.item_duration, Duration::from_secs(30));
    assert!(composition.skip_iframe_reload);
    assert!(!composition.failed);
}

#[tokio::test(start_paused = true)]
async fn test_composed_track_plays_in_order_with_iframe_preload() {
    let sheets = MemorySheets::default().with(
        "/content/org-a/recognitions.json",
        vec![entry(&[("LDAP", "jdoe"), ("Description", "Shipped")])],
    );
    let composition = CarouselComposer::new(&sheets, BuildOptions::default(), Durations::default())
        .compose(LOBBY, &base())
        .await;
    let item_duration = composition.item_duration;
    let mut track = CarouselTrack::new();
    composition.apply_to(&mut track);

    let mut engine = PlaybackEngine::new(
        PlaybackSlide::from_track(&track),
        item_duration,
        RecordingStage::default(),
        FixedClock(june_15()),
        Scheduler::default(),
    );
    let started = tokio::time::Instant::now();
    let handled = engine.run(3).await;

    assert_eq!(handled, 3);
    assert_eq!(engine.stage().shown, [0, 1, 2, 0]);
    assert_eq!(engine.stage().preloaded, [2]);
    assert_eq!(engine.state().current_index, Some(0));
    assert!(started.elapsed() >= item_duration * 3);
}
