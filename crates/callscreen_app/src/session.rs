//! Call sessions
//!
//! A [`CallSession`] is one incoming call on screen. It resolves the active
//! theme, runs the button and background choreographies, feeds input to the
//! commit controller and delivers the committed intent to the host.
//!
//! Time comes from the host: call [`CallSession::tick`] once per frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use callscreen_animation::{AnimationDriver, DriverId, MotionScheduler, MotionValues};
use callscreen_core::events::event_types;
use callscreen_core::{Event, EventData};
use callscreen_gesture::{
    Affordance, CallActions, Capabilities, CommitController, ControllerConfig, ControllerState,
    Effect, Effects, HapticFeedback, Intent, SliderMetrics,
};
use callscreen_theme::{
    resolve_theme, CallTheme, ResolvedAvatar, ResolvedBackground, ResolvedPalette, ResolvedTheme,
    StoreChange, SubscriptionId, ThemeStore, VideoFallback,
};
use serde::Serialize;

/// One control as it should be drawn this frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ControlFrame {
    #[serde(flatten)]
    pub affordance: Affordance,
    /// Motion masked to the channels this control honors
    pub motion: MotionValues,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ThumbFrame {
    #[serde(flatten)]
    pub metrics: SliderMetrics,
    pub offset: f32,
    pub motion: MotionValues,
}

/// Snapshot handed to the presentation layer
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderFrame {
    pub theme_id: String,
    pub palette: ResolvedPalette,
    pub background: ResolvedBackground,
    pub background_motion: MotionValues,
    pub avatar: ResolvedAvatar,
    pub show_labels: bool,
    pub controls: Vec<ControlFrame>,
    pub thumb: Option<ThumbFrame>,
    pub state: ControllerState,
    pub elapsed_ms: f64,
}

pub struct CallSession {
    store: Arc<ThemeStore>,
    subscription: Option<SubscriptionId>,
    theme_changed: Arc<AtomicBool>,
    theme: CallTheme,
    resolved: ResolvedTheme,
    video: VideoFallback,
    config: ControllerConfig,
    controller: CommitController,
    /// The theme's answer style changed while the controller was busy
    controller_stale: bool,
    scheduler: MotionScheduler,
    button_driver: DriverId,
    background_driver: DriverId,
    actions: Box<dyn CallActions>,
    haptics: Box<dyn HapticFeedback>,
    emitted: Option<Intent>,
    elapsed_ms: f64,
    ended: bool,
}

impl CallSession {
    /// Start a session showing the store's active theme
    ///
    /// Later changes to the active theme, including edits to it when it is
    /// a custom theme, are picked up on the next tick.
    pub fn new(
        store: Arc<ThemeStore>,
        actions: Box<dyn CallActions>,
        haptics: Box<dyn HapticFeedback>,
        config: ControllerConfig,
    ) -> Self {
        let theme = store.active_theme();
        let mut session = Self::with_theme(store, theme, actions, haptics, config);

        let flag = session.theme_changed.clone();
        session.subscription = Some(session.store.subscribe(move |change| {
            if matches!(
                change,
                StoreChange::ActiveChanged(_) | StoreChange::CustomSetChanged
            ) {
                flag.store(true, Ordering::Release);
            }
        }));
        session
    }

    /// Start a session pinned to `theme`, ignoring the active selection
    pub fn with_theme(
        store: Arc<ThemeStore>,
        theme: CallTheme,
        actions: Box<dyn CallActions>,
        haptics: Box<dyn HapticFeedback>,
        config: ControllerConfig,
    ) -> Self {
        let video = VideoFallback::new();
        let resolved = resolve_theme(&theme, &video);
        let controller =
            CommitController::new(&theme.answer_style, config, Capabilities::of(actions.as_ref()));

        let mut scheduler = MotionScheduler::new();
        let button_driver = scheduler.add(AnimationDriver::new());
        let background_driver = scheduler.add(AnimationDriver::new());

        let mut session = Self {
            store,
            subscription: None,
            theme_changed: Arc::new(AtomicBool::new(false)),
            theme,
            resolved,
            video,
            config,
            controller,
            controller_stale: false,
            scheduler,
            button_driver,
            background_driver,
            actions,
            haptics,
            emitted: None,
            elapsed_ms: 0.0,
            ended: false,
        };
        session.start_choreographies();
        tracing::debug!("call session started with theme `{}`", session.theme.id);
        session
    }

    fn start_choreographies(&mut self) {
        let kind = self.theme.answer_style.animation;
        let background = self.resolved.background.motion.choreography();
        if let Some(driver) = self.scheduler.get_mut(self.button_driver) {
            driver.set_kind(kind);
        }
        if let Some(driver) = self.scheduler.get_mut(self.background_driver) {
            driver.play(background);
        }
    }

    pub fn theme(&self) -> &CallTheme {
        &self.theme
    }

    pub fn resolved(&self) -> &ResolvedTheme {
        &self.resolved
    }

    pub fn controller(&self) -> &CommitController {
        &self.controller
    }

    pub fn state(&self) -> ControllerState {
        self.controller.state()
    }

    /// Intent delivered to the host, if any
    pub fn emitted(&self) -> Option<Intent> {
        self.emitted
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Swap to another theme mid-call
    ///
    /// Every running choreography is stopped and reset before the new
    /// theme's start. A drag, snap-back or commit run in progress keeps its
    /// controller; the new layout takes over once the thumb is back at rest.
    pub fn apply_theme(&mut self, theme: CallTheme) {
        if self.ended || theme == self.theme {
            return;
        }
        tracing::debug!("call session theme `{}` -> `{}`", self.theme.id, theme.id);

        self.scheduler.stop_all();
        self.resolved = resolve_theme(&theme, &self.video);
        self.theme = theme;
        self.controller_stale = true;
        self.rebuild_controller_if_idle();
        self.start_choreographies();
    }

    fn rebuild_controller_if_idle(&mut self) {
        if !self.controller_stale || self.controller.state() != ControllerState::Idle {
            return;
        }
        self.controller = CommitController::new(
            &self.theme.answer_style,
            self.config,
            Capabilities::of(self.actions.as_ref()),
        );
        self.controller_stale = false;
    }

    /// Feed one input event
    pub fn handle(&mut self, event: &Event) {
        if self.ended {
            return;
        }

        match event.event_type {
            event_types::VIDEO_ERROR => {
                let reason = match &event.data {
                    EventData::Media { message } => message.as_str(),
                    _ => "unknown error",
                };
                self.video.report_error(reason);
                let background = self.video.apply(self.resolved.background.clone());
                self.resolved.background = ResolvedBackground {
                    motion: self.resolved.background.motion,
                    ..background
                };
            }
            event_types::UNMOUNT => self.end(),
            _ => {
                let effects = self.controller.handle(event);
                self.apply_effects(effects);
            }
        }
    }

    /// Advance animations and thumb motion by one host frame
    pub fn tick(&mut self, dt_ms: f32) {
        if self.ended {
            return;
        }
        if self.theme_changed.swap(false, Ordering::AcqRel) {
            let active = self.store.active_theme();
            self.apply_theme(active);
        }

        self.elapsed_ms += f64::from(dt_ms.max(0.0));
        self.scheduler.tick(dt_ms);
        let effects = self.controller.tick(dt_ms);
        self.apply_effects(effects);
        self.rebuild_controller_if_idle();
    }

    fn apply_effects(&mut self, effects: Effects) {
        for effect in effects {
            match effect {
                Effect::Haptic(kind) => self.haptics.impact(kind),
                Effect::Emit(intent) => {
                    if let Some(previous) = self.emitted {
                        tracing::warn!("dropping {:?}, already delivered {:?}", intent, previous);
                        continue;
                    }
                    tracing::debug!("delivering {:?}", intent);
                    self.emitted = Some(intent);
                    self.actions.dispatch(intent);
                }
            }
        }
    }

    /// Stop everything; later input and ticks are ignored
    pub fn end(&mut self) {
        if self.ended {
            return;
        }
        self.scheduler.stop_all();
        if let Some(id) = self.subscription.take() {
            self.store.unsubscribe(id);
        }
        self.ended = true;
        tracing::debug!("call session ended after {:.0}ms", self.elapsed_ms);
    }

    fn driver_values(&self, id: DriverId) -> MotionValues {
        self.scheduler
            .get(id)
            .map(AnimationDriver::values)
            .unwrap_or_default()
    }

    /// Everything the presentation layer needs for this frame
    pub fn frame(&self) -> RenderFrame {
        let button = self.driver_values(self.button_driver);
        let layout = self.controller.layout();

        let controls = layout
            .controls
            .iter()
            .map(|affordance| ControlFrame {
                motion: button.masked(&affordance.channels),
                affordance: affordance.clone(),
            })
            .collect();
        let thumb = layout.slider.map(|metrics| ThumbFrame {
            metrics,
            offset: self.controller.thumb_offset(),
            motion: button.masked(&layout.thumb_channels),
        });

        RenderFrame {
            theme_id: self.resolved.id.clone(),
            palette: self.resolved.palette,
            background: self.resolved.background.clone(),
            background_motion: self.driver_values(self.background_driver),
            avatar: self.resolved.avatar,
            show_labels: self.theme.answer_style.show_labels,
            controls,
            thumb,
            state: self.controller.state(),
            elapsed_ms: self.elapsed_ms,
        }
    }
}

impl Drop for CallSession {
    fn drop(&mut self) {
        self.end();
    }
}
