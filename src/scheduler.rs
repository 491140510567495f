//! Session clock and render actor.
//!
//! Every cue arms two one-shot triggers, a show and a hide, each a task that
//! sleeps until its offset from the start of the session and then sends a
//! command to the render actor. The actor is the only owner of the
//! [`Renderer`], so commands are applied one at a time in the order they
//! arrive.

use crate::cue::Cue;
use crate::display::Display;
use crate::renderer::{resolve_color, Renderer};

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::{AbortHandle, JoinError, JoinHandle, JoinSet};
use tokio::time::{self, Instant};
use tracing::{debug, warn};

#[derive(Debug)]
enum Command {
    Show { cue: Cue },
    Hide { text: String },
    Visible(oneshot::Sender<Vec<String>>),
}

async fn render_loop<D: Display>(
    mut renderer: Renderer<D>,
    mut rx: mpsc::UnboundedReceiver<Command>,
) -> Renderer<D> {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Show { cue } => {
                let placement = cue.placement.unwrap_or_default();
                let shown = resolve_color(cue.color.as_deref())
                    .and_then(|color| renderer.show(placement, color, &cue.text));
                if let Err(err) = shown {
                    warn!(text = %cue.text, error = %err, "failed to show cue");
                }
            }
            Command::Hide { text } => {
                if let Err(err) = renderer.hide(&text) {
                    warn!(text = %text, error = %err, "failed to hide cue");
                }
            }
            Command::Visible(reply) => {
                let mut visible: Vec<String> = renderer.shown().keys().cloned().collect();
                visible.sort();
                let _ = reply.send(visible);
            }
        }
    }
    renderer
}

/// Cancels the triggers of one scheduled cue.
#[derive(Debug)]
pub struct CueHandle {
    show: AbortHandle,
    hide: AbortHandle,
}

impl CueHandle {
    /// Disarms both triggers. A trigger that already fired is unaffected, so a
    /// cue cancelled after it was shown stays on screen.
    pub fn cancel(self) {
        self.show.abort();
        self.hide.abort();
    }
}

pub struct Scheduler<D: Display + 'static> {
    started: Instant,
    tx: mpsc::UnboundedSender<Command>,
    triggers: JoinSet<()>,
    actor: JoinHandle<Renderer<D>>,
}

impl<D: Display + 'static> Scheduler<D> {
    /// Hands `renderer` to a new render actor and starts the session clock.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(renderer: Renderer<D>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let actor = tokio::spawn(render_loop(renderer, rx));
        Self {
            started: Instant::now(),
            tx,
            triggers: JoinSet::new(),
            actor,
        }
    }

    /// Arms the show and hide triggers for `cue` without waiting for either.
    ///
    /// The hide trigger never overtakes its own show trigger, so a cue whose
    /// offsets are equal ends up hidden.
    pub fn schedule(&mut self, cue: Cue) -> CueHandle {
        while self.triggers.try_join_next().is_some() {}

        debug!(
            text = %cue.text,
            show_at = ?cue.show_at,
            hide_at = ?cue.hide_at,
            "arming cue"
        );
        let (hide_at, text) = (cue.hide_at, cue.text.clone());
        let (fired_tx, fired_rx) = oneshot::channel::<()>();

        let show = self.arm(cue.show_at, Command::Show { cue }, Some(fired_tx), None);
        let hide = self.arm(hide_at, Command::Hide { text }, None, Some(fired_rx));
        CueHandle { show, hide }
    }

    fn arm(
        &mut self,
        offset: Duration,
        command: Command,
        fired: Option<oneshot::Sender<()>>,
        after: Option<oneshot::Receiver<()>>,
    ) -> AbortHandle {
        let deadline = self.started + offset;
        let tx = self.tx.clone();
        self.triggers.spawn(async move {
            time::sleep_until(deadline).await;
            if let Some(after) = after {
                // An error means the other trigger was cancelled; fire anyway.
                let _ = after.await;
            }
            // The actor outlives every trigger, see `finish`.
            let _ = tx.send(command);
            if let Some(fired) = fired {
                let _ = fired.send(());
            }
        })
    }

    /// Texts currently on screen, sorted.
    pub async fn visible(&self) -> Vec<String> {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(Command::Visible(reply)).is_err() {
            return Vec::new();
        }
        rx.await.unwrap_or_default()
    }

    /// Waits until every armed trigger has fired, then stops the actor and
    /// returns the renderer.
    pub async fn finish(self) -> Result<Renderer<D>, JoinError> {
        let Scheduler {
            tx,
            mut triggers,
            actor,
            ..
        } = self;

        while let Some(result) = triggers.join_next().await {
            if let Err(err) = result {
                if !err.is_cancelled() {
                    warn!(error = %err, "cue trigger panicked");
                }
            }
        }
        drop(tx);
        actor.await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::testing::RecordingDisplay;
    use crate::parser::Parser;
    use crate::surface::{Surface, Viewport};

    fn scheduler() -> (Scheduler<RecordingDisplay>, RecordingDisplay) {
        let display = RecordingDisplay::new(80, 24);
        let surface = Surface::new(Viewport {
            width: 80,
            height: 24,
        })
        .unwrap();
        let renderer = Renderer::new(surface, display.clone());
        (Scheduler::start(renderer), display)
    }

    fn cue(line: &str) -> Cue {
        Parser::new().parse(line).unwrap()
    }

    async fn advance_to(start: Instant, millis: u64) {
        time::sleep_until(start + Duration::from_millis(millis)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn shows_and_hides_at_offsets() {
        let (mut scheduler, display) = scheduler();
        let start = Instant::now();
        scheduler.schedule(cue("00:05 01:00 [Top, Red] Hello World"));

        advance_to(start, 4_999).await;
        assert!(scheduler.visible().await.is_empty());

        advance_to(start, 5_001).await;
        assert_eq!(scheduler.visible().await, vec!["Hello World"]);
        assert_eq!(display.screen().read(35, 6, 11), "Hello World");

        advance_to(start, 60_001).await;
        assert!(scheduler.visible().await.is_empty());
        assert_eq!(display.screen().read(35, 6, 11).trim(), "");

        let renderer = scheduler.finish().await.unwrap();
        assert!(!renderer.is_shown("Hello World"));
    }

    #[tokio::test(start_paused = true)]
    async fn equal_offsets_end_hidden() {
        let (mut scheduler, display) = scheduler();
        scheduler.schedule(cue("00:00 00:00 Bye"));

        let renderer = scheduler.finish().await.unwrap();

        assert!(renderer.shown().is_empty());
        let screen = display.screen();
        assert_eq!(screen.read(39, 11, 3), "   ");
        // one flush for the show, one for the hide
        assert_eq!(screen.flushes, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_cues_are_independent() {
        let (mut scheduler, _display) = scheduler();
        let start = Instant::now();
        scheduler.schedule(cue("00:01 00:05 [Left, Green] Long"));
        scheduler.schedule(cue("00:02 00:03 [Right, Blue] Short"));

        advance_to(start, 2_500).await;
        assert_eq!(scheduler.visible().await, vec!["Long", "Short"]);

        advance_to(start, 4_000).await;
        assert_eq!(scheduler.visible().await, vec!["Long"]);

        advance_to(start, 5_000).await;
        let renderer = scheduler.finish().await.unwrap();
        assert!(renderer.shown().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn clock_is_shared_by_all_cues() {
        let (mut scheduler, _display) = scheduler();
        let start = Instant::now();

        advance_to(start, 3_000).await;
        // Offsets count from the session start, not from when the cue arrives.
        scheduler.schedule(cue("00:02 00:04 Late"));

        advance_to(start, 3_001).await;
        assert_eq!(scheduler.visible().await, vec!["Late"]);

        scheduler.finish().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn failing_trigger_does_not_stop_others() {
        let (mut scheduler, _display) = scheduler();
        let start = Instant::now();
        scheduler.schedule(cue("00:01 00:03 [Top, Mauve] Broken"));
        scheduler.schedule(cue("00:01 00:03 [Bottom, Red] Fine"));

        advance_to(start, 2_000).await;
        assert_eq!(scheduler.visible().await, vec!["Fine"]);

        let renderer = scheduler.finish().await.unwrap();
        assert!(renderer.shown().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_cue_never_shows() {
        let (mut scheduler, display) = scheduler();
        let handle = scheduler.schedule(cue("00:01 00:02 Gone"));

        handle.cancel();

        scheduler.finish().await.unwrap();
        assert_eq!(display.screen().flushes, 0);
    }
}
