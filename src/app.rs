use anyhow::Result;
use chrono::Duration;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use crate::{
    config::Config,
    event::{Event, EventHandler},
    meteor::{
        catalog::{Shower, active_showers},
        layer::MeteorShowerLayer,
    },
    shared_state::SharedState,
    tui::Tui,
    widgets::{
        constellation_details::{self, ConstellationDetails, ConstellationDetailsState},
        keymap::Keymap,
        shower_details::{self, ShowerDetails},
        shower_status::{self, ShowerStatus, ShowerStatusState},
        sky::{self, Sky, SkyState},
        timeline::{self, Timeline, TimelineState},
    },
    zodiac::Constellation,
};

/// Application.
pub struct App {
    /// Indicates if the application is currently active and running. When set
    /// to false, triggers application shutdown.
    pub running: bool,

    pub states: States,

    tui: Tui,
}

/// State of every widget, plus what they share.
pub struct States {
    pub shared: SharedState,
    pub sky_state: SkyState,
    pub timeline_state: TimelineState,
    pub status_state: ShowerStatusState,
    pub meteor_layer: MeteorShowerLayer,
    /// Shower whose details popup is open.
    pub details: Option<&'static Shower>,
    pub constellation_details: ConstellationDetailsState,
    pub show_keymap: bool,
}

impl States {
    pub fn with_config(config: &Config) -> Self {
        let shared = SharedState::with_config(config);
        let mut status_state = ShowerStatusState::default();
        status_state.update(shared.time.local_date());

        Self {
            sky_state: SkyState::with_config(&config.sky),
            timeline_state: TimelineState::default(),
            status_state,
            meteor_layer: MeteorShowerLayer::new(
                config.meteor_showers.show_on_startup,
                config.meteor_showers.label_color,
            ),
            details: None,
            constellation_details: ConstellationDetailsState::default(),
            show_keymap: false,
            shared,
        }
    }

    /// Returns the showers active on the simulation date.
    fn active_showers(&self) -> Vec<&'static Shower> {
        active_showers(&self.shared.time.local_date())
    }

    /// Returns `true` while a popup takes all input.
    fn popup_open(&self) -> bool {
        self.details.is_some() || self.constellation_details.constellation().is_some()
    }

    /// Shows or hides the meteor shower radiants.
    pub fn toggle_meteor_showers(&mut self) {
        let active = self.active_showers();
        self.meteor_layer
            .toggle(&active, self.sky_state.projection());
    }

    /// Centres the chart on a constellation and opens its details.
    pub fn show_constellation(&mut self, constellation: &'static Constellation) {
        self.sky_state.focus_on(Some(constellation));
        self.constellation_details.open(constellation);
        tracing::info!(constellation = constellation.name, "constellation selected");
    }

    /// Notifies the meteor layer that the sky has been redrawn.
    ///
    /// Without a projection nothing was drawn, so no marker may remain.
    pub fn sky_redrawn(&mut self) {
        let Some(projection) = self.sky_state.projection() else {
            self.meteor_layer.clear();
            return;
        };
        let active = self.active_showers();
        self.meteor_layer
            .on_redraw_completed(self.sky_state.generation(), &active, projection);
    }

    /// Returns to the wall clock, the configured projection and the zenith,
    /// and hides the radiants.
    pub fn reset_view(&mut self) {
        self.shared.time.reset();
        self.sky_state.reset();
        self.meteor_layer.disable();
        self.details = None;
        self.constellation_details.close();
        tracing::info!("view reset");
    }

    /// Routes an input or timer event to the widgets.
    pub async fn handle_event(&mut self, event: Event) -> Result<()> {
        // Keeps the status panel current behind popups.
        if let Event::Tick = event {
            return shower_status::handle_event(event, self).await;
        }

        // Popups are modal.
        if self.details.is_some() {
            return shower_details::handle_event(event, self).await;
        }
        if self.constellation_details.constellation().is_some() {
            return constellation_details::handle_event(event, self).await;
        }

        if let Event::Key(event) = event {
            self.handle_key_event(event);
        }

        sky::handle_event(event, self).await?;
        timeline::handle_event(event, self).await?;
        shower_status::handle_event(event, self).await
    }

    fn handle_key_event(&mut self, event: KeyEvent) {
        match event.code {
            KeyCode::Char('?') => self.show_keymap = !self.show_keymap,
            KeyCode::Esc => self.show_keymap = false,
            KeyCode::Char('m') => self.toggle_meteor_showers(),
            KeyCode::Char('r') => self.reset_view(),
            KeyCode::Char('[') => self.shared.time.rewind_time(self.sky_state.time_delta),
            KeyCode::Char(']') => self.shared.time.advance_time(self.sky_state.time_delta),
            KeyCode::Char('{') => self.shared.time.rewind_time(Duration::days(1)),
            KeyCode::Char('}') => self.shared.time.advance_time(Duration::days(1)),
            _ => {}
        }
    }
}

impl App {
    /// Creates a new `App` with the given configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        let backend = CrosstermBackend::new(std::io::stdout());
        let terminal = Terminal::new(backend)?;
        let events = EventHandler::new();
        let tui = Tui::new(terminal, events);
        Ok(Self {
            running: true,
            states: States::with_config(&config),
            tui,
        })
    }

    /// Runs the main loop of the application.
    pub async fn run(&mut self) -> Result<()> {
        self.tui.init()?;

        // The main loop.
        while self.running {
            let event = self.tui.events.next().await?;
            self.handle_event(event).await?;
        }

        self.tui.deinit()
    }

    /// Set running to false to quit the application.
    fn request_exit(&mut self) {
        self.running = false;
    }

    /// Renders the terminal interface, then lets the meteor layer catch up
    /// with the view that was drawn.
    fn render(&mut self) -> Result<()> {
        let states = &mut self.states;
        self.tui.terminal.draw(|frame| {
            let horizontal = Layout::horizontal([Constraint::Fill(1), Constraint::Length(52)]);
            let [left_area, right_area] = horizontal.areas(frame.area());
            let vertical = Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]);
            let [sky_area, timeline_area] = vertical.areas(left_area);

            let sky = Sky {
                state: &mut states.sky_state,
                shared: &states.shared,
                meteor_layer: &states.meteor_layer,
                highlight: states.constellation_details.constellation(),
            };
            frame.render_widget(sky, sky_area);

            let timeline = Timeline {
                shared: &states.shared,
            };
            frame.render_stateful_widget(timeline, timeline_area, &mut states.timeline_state);

            frame.render_stateful_widget(ShowerStatus, right_area, &mut states.status_state);

            if let Some(shower) = states.details {
                frame.render_widget(ShowerDetails { shower }, frame.area());
            } else if states.constellation_details.constellation().is_some() {
                frame.render_stateful_widget(
                    ConstellationDetails,
                    frame.area(),
                    &mut states.constellation_details,
                );
            } else if states.show_keymap {
                frame.render_widget(Keymap, frame.area());
            }
        })?;

        self.states.sky_redrawn();
        Ok(())
    }

    async fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Render => return self.render(),
            Event::Resize(width, height) => {
                tracing::debug!(width, height, "terminal resized");
            }
            Event::Key(key) if !self.states.popup_open() && is_exit_key(key) => {
                self.request_exit();
                return Ok(());
            }
            _ => {}
        }
        self.states.handle_event(event).await
    }
}

/// `q` or `Ctrl-C`.
fn is_exit_key(event: KeyEvent) -> bool {
    match event.code {
        KeyCode::Char('q') => true,
        KeyCode::Char('c') => event.modifiers == KeyModifiers::CONTROL,
        _ => false,
    }
}
