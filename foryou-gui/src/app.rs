use std::sync::Arc;

use eframe::egui::{self, Color32, RichText};
use foryou_core::layout::number_of_columns_with;
use foryou_core::model::ImageSource;
use foryou_core::navigation::top_level_destinations;
use foryou_core::screen::compose_with_columns;
use foryou_core::{
    AppConfig, FeedState, FollowableAuthor, FollowableTopic, Intent, InterestsSelectionState,
    LoadFailure, ProviderHandle, SaveableNewsResource, ScreenInput, ScreenItem, Section,
    SnapshotSource, TopLevelNavigator, WatchSource, WindowWidthClass, FOR_YOU,
};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use url::Url;

use crate::theme;

const AUTHOR_AVATAR_SIZE: f32 = 48.0;
const TOPIC_ICON_SIZE: f32 = 32.0;
const TOPIC_GRID_ROWS: usize = 3;

pub struct AppInit {
    pub runtime: Arc<Runtime>,
    pub provider: ProviderHandle,
    pub intents: mpsc::Sender<Intent>,
    pub interests: WatchSource<InterestsSelectionState>,
    pub feed: WatchSource<FeedState>,
    pub navigator: TopLevelNavigator,
    pub config: AppConfig,
}

pub struct ForYouApp {
    runtime: Arc<Runtime>,
    provider: Option<ProviderHandle>,
    intents: mpsc::Sender<Intent>,
    interests_source: WatchSource<InterestsSelectionState>,
    feed_source: WatchSource<FeedState>,
    interests: InterestsSelectionState,
    feed: FeedState,
    navigator: TopLevelNavigator,
    config: AppConfig,
}

impl ForYouApp {
    pub fn new(init: AppInit) -> Self {
        let interests = init.interests.latest();
        let feed = init.feed.latest();
        Self {
            runtime: init.runtime,
            provider: Some(init.provider),
            intents: init.intents,
            interests_source: init.interests,
            feed_source: init.feed,
            interests,
            feed,
            navigator: init.navigator,
            config: init.config,
        }
    }

    fn refresh_snapshots(&mut self) {
        if let Some(interests) = self.interests_source.poll_changed() {
            self.interests = interests;
        }
        if let Some(feed) = self.feed_source.poll_changed() {
            self.feed = feed;
        }
    }

    fn send(&self, intent: Intent) {
        debug!(?intent, "sending intent");
        if let Err(e) = self.intents.try_send(intent) {
            warn!(error = %e, "failed to deliver intent to the provider");
        }
    }

    fn draw_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(
                    RichText::new("Now in Android")
                        .strong()
                        .color(theme::accent(&self.config.theme)),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    for destination in top_level_destinations() {
                        let selected = self.navigator.is_selected(destination);
                        let icon = if selected {
                            destination.selected_icon
                        } else {
                            destination.unselected_icon
                        };
                        let label = format!("{} {}", icon, destination.label);
                        if ui.selectable_label(selected, label).clicked() {
                            if let Err(e) = self.navigator.navigate_to(destination.route) {
                                warn!(error = %e, "navigation failed");
                            }
                        }
                    }
                });
            });
        });
    }

    fn draw_main_content(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.navigator.current() == FOR_YOU.route {
                self.draw_for_you(ui);
            } else {
                ui.label(RichText::new("Nothing to show here yet").weak());
            }
        });
    }

    fn draw_for_you(&mut self, ui: &mut egui::Ui) {
        let ui_config = &self.config.ui;
        let width = ui.available_width();
        let width_class = WindowWidthClass::from_width_with(
            width,
            ui_config.compact_max_width,
            ui_config.medium_max_width,
        );
        let columns = number_of_columns_with(width_class, width, ui_config.column_unit_width);
        let items = compose_with_columns(
            ScreenInput {
                interests: &self.interests,
                feed: &self.feed,
                width_class,
                available_width: width,
                bottom_inset: ui_config.bottom_inset,
            },
            columns,
        );

        let mut intents = Vec::new();
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for item in &items {
                    self.draw_item(ui, item, &mut intents);
                }
            });

        for intent in intents {
            self.send(intent);
        }
    }

    fn draw_item(&self, ui: &mut egui::Ui, item: &ScreenItem, intents: &mut Vec<Intent>) {
        match item {
            ScreenItem::LoadingWheel(section) => {
                ui.add_space(24.0);
                ui.vertical_centered(|ui| {
                    ui.add(egui::Spinner::new().size(32.0))
                        .on_hover_text(format!("Loading {}", section_name(*section)));
                });
            }
            ScreenItem::OnboardingTitle => {
                ui.add_space(24.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("What are you interested in?").strong().size(20.0));
                });
            }
            ScreenItem::OnboardingSubtitle => {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(
                            "Updates from topics you follow will appear here. \
                             Follow some things to get started.",
                        )
                        .color(theme::secondary_text(&self.config.theme)),
                    );
                });
            }
            ScreenItem::AuthorsCarousel(authors) => {
                ui.add_space(8.0);
                egui::ScrollArea::horizontal()
                    .id_source("authors_carousel")
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.add_space(24.0);
                            for author in authors {
                                self.draw_author(ui, author, intents);
                                ui.add_space(16.0);
                            }
                        });
                    });
            }
            ScreenItem::TopicSelection(topics) => {
                ui.add_space(8.0);
                self.draw_topic_selection(ui, topics, intents);
            }
            ScreenItem::SaveInterestsButton { enabled } => {
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    let button = egui::Button::new(RichText::new("Done").strong())
                        .min_size(egui::vec2(ui.available_width().min(364.0), 36.0));
                    if ui.add_enabled(*enabled, button).clicked() {
                        intents.push(Intent::SaveInterests);
                    }
                });
            }
            ScreenItem::FeedRow(row) => {
                ui.add_space(24.0);
                // empty trailing slots keep their column
                ui.columns(row.len(), |cols| {
                    for (col, slot) in cols.iter_mut().zip(row) {
                        if let Some(resource) = slot {
                            self.draw_news_card(col, resource, intents);
                        }
                    }
                });
            }
            ScreenItem::LoadError { section, failure } => {
                self.draw_load_error(ui, *section, failure, intents);
            }
            ScreenItem::BottomSpacer(height) => {
                ui.add_space(*height);
            }
        }
    }

    fn draw_author(&self, ui: &mut egui::Ui, author: &FollowableAuthor, intents: &mut Vec<Intent>) {
        ui.vertical(|ui| {
            ui.set_width(AUTHOR_AVATAR_SIZE + 24.0);
            ui.vertical_centered(|ui| {
                let avatar = draw_image(ui, author.author.image(), AUTHOR_AVATAR_SIZE, "👤");
                let mark = if author.is_followed { "✔" } else { "＋" };
                let follow = ui.selectable_label(author.is_followed, mark);
                let state = if author.is_followed {
                    "Following"
                } else {
                    "Not following"
                };
                if avatar.clicked() || follow.on_hover_text(state).clicked() {
                    intents.push(Intent::toggle_author(author));
                }
                ui.label(RichText::new(&author.author.name).size(12.0));
            });
        });
    }

    fn draw_topic_selection(
        &self,
        ui: &mut egui::Ui,
        topics: &[FollowableTopic],
        intents: &mut Vec<Intent>,
    ) {
        egui::ScrollArea::horizontal()
            .id_source("topic_selection")
            .show(ui, |ui| {
                egui::Grid::new("topic_grid")
                    .spacing(egui::vec2(12.0, 12.0))
                    .show(ui, |ui| {
                        // column-major, like a horizontally scrolling grid
                        for row in 0..TOPIC_GRID_ROWS {
                            for topic in topics.iter().skip(row).step_by(TOPIC_GRID_ROWS) {
                                self.draw_topic_button(ui, topic, intents);
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    fn draw_topic_button(&self, ui: &mut egui::Ui, topic: &FollowableTopic, intents: &mut Vec<Intent>) {
        ui.group(|ui| {
            ui.set_min_width(260.0);
            ui.horizontal(|ui| {
                let icon = draw_image(ui, topic.topic.image(), TOPIC_ICON_SIZE, "#");
                let name = ui.add(
                    egui::Label::new(RichText::new(&topic.topic.name).strong())
                        .sense(egui::Sense::click()),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mark = if topic.is_followed { "✔" } else { "＋" };
                    let toggle = ui.selectable_label(topic.is_followed, mark);
                    if icon.clicked() || name.clicked() || toggle.clicked() {
                        intents.push(Intent::toggle_topic(topic));
                    }
                });
            });
        });
    }

    fn draw_news_card(
        &self,
        ui: &mut egui::Ui,
        resource: &SaveableNewsResource,
        intents: &mut Vec<Intent>,
    ) {
        let news = &resource.news_resource;
        ui.group(|ui| {
            ui.vertical(|ui| {
                if let ImageSource::Remote(uri) = news.header_image() {
                    ui.add(egui::Image::new(uri).max_height(180.0).rounding(8.0));
                }
                ui.horizontal(|ui| {
                    let title = ui.add(
                        egui::Label::new(RichText::new(&news.title).strong().size(17.0))
                            .sense(egui::Sense::click()),
                    );
                    if title.on_hover_text(&news.url).clicked() {
                        open_resource(&news.url);
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                        let (label, hint) = if resource.is_saved {
                            ("🔖", "Remove bookmark")
                        } else {
                            ("🏷", "Bookmark")
                        };
                        if ui
                            .selectable_label(resource.is_saved, label)
                            .on_hover_text(hint)
                            .clicked()
                        {
                            intents.push(Intent::toggle_saved(resource));
                        }
                    });
                });
                let mut meta = news.publish_date.format("%b %d, %Y").to_string();
                let kind = news.resource_type.label();
                if !kind.is_empty() {
                    meta.push_str(" • ");
                    meta.push_str(kind);
                }
                ui.label(
                    RichText::new(meta)
                        .size(12.0)
                        .color(theme::secondary_text(&self.config.theme)),
                );
                if !news.content.is_empty() {
                    ui.label(&news.content);
                }
            });
        });
    }

    fn draw_load_error(
        &self,
        ui: &mut egui::Ui,
        section: Section,
        failure: &LoadFailure,
        intents: &mut Vec<Intent>,
    ) {
        ui.add_space(16.0);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(format!(
                    "Couldn't load {}: {}",
                    section_name(section),
                    failure.message
                ))
                .color(Color32::from_rgb(242, 184, 181)),
            );
            if failure.recoverable && ui.button("Retry").clicked() {
                intents.push(Intent::Retry(section));
            }
        });
    }
}

fn section_name(section: Section) -> &'static str {
    match section {
        Section::Interests => "your interests",
        Section::Feed => "your feed",
    }
}

/// Draws `source`, or `glyph` for a placeholder. Placeholders never hit the image loader.
fn draw_image(ui: &mut egui::Ui, source: ImageSource<'_>, size: f32, glyph: &str) -> egui::Response {
    let sense = egui::Sense::click();
    match source {
        ImageSource::Placeholder => ui.add_sized(
            [size, size],
            egui::Label::new(RichText::new(glyph).size(size * 0.6)).sense(sense),
        ),
        ImageSource::Remote(uri) => ui.add(
            egui::Image::new(uri)
                .fit_to_exact_size(egui::vec2(size, size))
                .rounding(size / 2.0)
                .sense(sense),
        ),
    }
}

fn open_resource(raw: &str) {
    match Url::parse(raw) {
        Ok(parsed) if matches!(parsed.scheme(), "https" | "http") => {
            if let Err(e) = webbrowser::open(parsed.as_str()) {
                warn!(error = %e, url = raw, "failed to open link");
            }
        }
        Ok(parsed) => warn!(scheme = parsed.scheme(), "refusing to open non-web link"),
        Err(e) => warn!(error = %e, url = raw, "invalid resource url"),
    }
}

impl Drop for ForYouApp {
    fn drop(&mut self) {
        if let Some(handle) = self.provider.take() {
            let _ = self.runtime.block_on(handle.stop());
        }
    }
}

impl eframe::App for ForYouApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        theme::apply(ctx, &self.config.theme, &self.config.ui);
        self.refresh_snapshots();

        self.draw_top_bar(ctx);
        self.draw_main_content(ctx);

        // snapshots arrive from another task
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}
