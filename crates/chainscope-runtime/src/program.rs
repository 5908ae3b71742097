#![forbid(unsafe_code)]

//! The update/view loop.
//!
//! A [`Model`] owns all application state; every input event converts into
//! the model's message type and is applied on the loop thread. Side effects
//! come back as [`Cmd`] values; `Cmd::task` runs a closure on a spawned
//! thread and feeds its resulting message through a channel, so a slow
//! fetch never blocks input handling or rendering.

use std::io::{self, Stdout};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use chainscope_core::event::Event;
use chainscope_core::terminal::{SessionOptions, TerminalSession};
use chainscope_render::{Frame, Presenter};

/// Application state and behavior.
pub trait Model: Sized {
    /// Message type; every terminal event must convert into one.
    type Message: From<Event> + Send + 'static;

    /// Startup effects, run once before the first frame.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Apply a message, returning follow-up effects.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render the current state.
    fn view(&self, frame: &mut Frame);
}

enum CmdInner<M> {
    None,
    Quit,
    Msg(M),
    Batch(Vec<Cmd<M>>),
    Task(Box<dyn FnOnce() -> M + Send + 'static>),
}

/// An effect requested by an update.
pub struct Cmd<M>(CmdInner<M>);

impl<M> Cmd<M> {
    /// No effect.
    #[must_use]
    pub fn none() -> Self {
        Self(CmdInner::None)
    }

    /// Stop the program after this update.
    #[must_use]
    pub fn quit() -> Self {
        Self(CmdInner::Quit)
    }

    /// Feed another message through `update` immediately.
    #[must_use]
    pub fn msg(message: M) -> Self {
        Self(CmdInner::Msg(message))
    }

    /// Run several effects in order.
    #[must_use]
    pub fn batch(cmds: Vec<Self>) -> Self {
        Self(CmdInner::Batch(cmds))
    }

    /// Run a closure on a background thread; its return value re-enters
    /// the loop as a message.
    #[must_use]
    pub fn task<F>(f: F) -> Self
    where
        F: FnOnce() -> M + Send + 'static,
    {
        Self(CmdInner::Task(Box::new(f)))
    }

    /// Wrap every message this command produces, so a child component's
    /// commands can flow through a parent message type.
    #[must_use]
    pub fn map<N, F>(self, f: F) -> Cmd<N>
    where
        M: 'static,
        F: Fn(M) -> N + Send + Clone + 'static,
    {
        Cmd(match self.0 {
            CmdInner::None => CmdInner::None,
            CmdInner::Quit => CmdInner::Quit,
            CmdInner::Msg(message) => CmdInner::Msg(f(message)),
            CmdInner::Batch(cmds) => {
                CmdInner::Batch(cmds.into_iter().map(|c| c.map(f.clone())).collect())
            }
            CmdInner::Task(task) => CmdInner::Task(Box::new(move || f(task()))),
        })
    }
}

/// Program loop configuration.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Capture mouse events.
    pub mouse: bool,
    /// Input poll timeout; when it elapses a [`Event::Tick`] is delivered.
    pub tick_interval: Duration,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            mouse: true,
            tick_interval: Duration::from_millis(100),
        }
    }
}

/// Apply a command against a model, spawning tasks onto `task_tx`.
///
/// Split out of [`Program`] so updates can be driven without a terminal.
pub(crate) fn process<M: Model>(
    model: &mut M,
    cmd: Cmd<M::Message>,
    task_tx: &mpsc::Sender<M::Message>,
    quit: &mut bool,
) {
    match cmd.0 {
        CmdInner::None => {}
        CmdInner::Quit => {
            debug!("quit requested");
            *quit = true;
        }
        CmdInner::Msg(message) => {
            let next = model.update(message);
            process(model, next, task_tx, quit);
        }
        CmdInner::Batch(cmds) => {
            for cmd in cmds {
                process(model, cmd, task_tx, quit);
            }
        }
        CmdInner::Task(f) => {
            let tx = task_tx.clone();
            thread::spawn(move || {
                let _ = tx.send(f());
            });
        }
    }
}

/// Runs a [`Model`] against the real terminal.
pub struct Program<M: Model> {
    model: M,
    config: ProgramConfig,
    session: TerminalSession,
    presenter: Presenter<Stdout>,
    width: u16,
    height: u16,
    task_tx: mpsc::Sender<M::Message>,
    task_rx: mpsc::Receiver<M::Message>,
    quit: bool,
}

impl<M: Model> Program<M> {
    /// Enter the terminal session and prepare the loop.
    pub fn new(model: M, config: ProgramConfig) -> io::Result<Self> {
        let session = TerminalSession::enter(SessionOptions {
            mouse: config.mouse,
        })?;
        let (width, height) = session.size()?;
        let (task_tx, task_rx) = mpsc::channel();
        info!(width, height, mouse = config.mouse, "program starting");
        Ok(Self {
            model,
            config,
            session,
            presenter: Presenter::new(io::stdout()),
            width,
            height,
            task_tx,
            task_rx,
            quit: false,
        })
    }

    /// Run until the model requests quit. Restores the terminal on return.
    pub fn run(&mut self) -> io::Result<()> {
        let init = self.model.init();
        process(&mut self.model, init, &self.task_tx, &mut self.quit);
        self.render()?;

        while !self.quit {
            // Background task results first: their state feeds this
            // frame's view.
            while let Ok(message) = self.task_rx.try_recv() {
                let cmd = self.model.update(message);
                process(&mut self.model, cmd, &self.task_tx, &mut self.quit);
            }

            let event = self
                .session
                .poll_event(self.config.tick_interval)?
                .unwrap_or(Event::Tick);
            if let Event::Resize { width, height } = &event {
                debug!(width = *width, height = *height, "terminal resized");
                self.width = *width;
                self.height = *height;
                self.presenter.invalidate();
            }
            let cmd = self.model.update(event.into());
            process(&mut self.model, cmd, &self.task_tx, &mut self.quit);

            self.render()?;
        }

        info!("program stopping");
        self.session.restore()
    }

    fn render(&mut self) -> io::Result<()> {
        let mut frame = Frame::new(self.width, self.height);
        self.model.view(&mut frame);
        self.presenter.present(&frame.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct Counter {
        count: i32,
    }

    enum Msg {
        Add(i32),
        AddTwice(i32),
        Quit,
        Noop,
    }

    impl From<Event> for Msg {
        fn from(_: Event) -> Self {
            Msg::Noop
        }
    }

    impl Model for Counter {
        type Message = Msg;

        fn update(&mut self, msg: Msg) -> Cmd<Msg> {
            match msg {
                Msg::Add(n) => {
                    self.count += n;
                    Cmd::none()
                }
                Msg::AddTwice(n) => {
                    self.count += n;
                    Cmd::msg(Msg::Add(n))
                }
                Msg::Quit => Cmd::quit(),
                Msg::Noop => Cmd::none(),
            }
        }

        fn view(&self, _frame: &mut Frame) {}
    }

    fn drive(model: &mut Counter, cmd: Cmd<Msg>) -> (mpsc::Receiver<Msg>, bool) {
        let (tx, rx) = mpsc::channel();
        let mut quit = false;
        process(model, cmd, &tx, &mut quit);
        (rx, quit)
    }

    #[test]
    fn msg_feeds_back_through_update() {
        let mut model = Counter { count: 0 };
        drive(&mut model, Cmd::msg(Msg::Add(3)));
        assert_eq!(model.count, 3);
    }

    #[test]
    fn chained_msg_runs_to_completion() {
        let mut model = Counter { count: 0 };
        drive(&mut model, Cmd::msg(Msg::AddTwice(2)));
        assert_eq!(model.count, 4);
    }

    #[test]
    fn batch_applies_in_order() {
        let mut model = Counter { count: 0 };
        drive(
            &mut model,
            Cmd::batch(vec![Cmd::msg(Msg::Add(1)), Cmd::msg(Msg::Add(10))]),
        );
        assert_eq!(model.count, 11);
    }

    #[test]
    fn quit_sets_flag() {
        let mut model = Counter { count: 0 };
        let (_, quit) = drive(&mut model, Cmd::msg(Msg::Quit));
        assert!(quit);
    }

    #[test]
    fn task_result_arrives_on_channel() {
        let mut model = Counter { count: 0 };
        let (rx, _) = drive(&mut model, Cmd::task(|| Msg::Add(7)));
        let message = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        // The task's message has not been applied yet: the loop applies it
        // on its next iteration.
        assert_eq!(model.count, 0);
        model.update(message);
        assert_eq!(model.count, 7);
    }

    #[test]
    fn map_wraps_messages_and_tasks() {
        enum Outer {
            Inner(Msg),
        }
        struct Shell {
            counter: Counter,
        }
        impl From<Event> for Outer {
            fn from(event: Event) -> Self {
                Outer::Inner(event.into())
            }
        }
        impl Model for Shell {
            type Message = Outer;
            fn update(&mut self, msg: Outer) -> Cmd<Outer> {
                let Outer::Inner(inner) = msg;
                self.counter.update(inner).map(Outer::Inner)
            }
            fn view(&self, _frame: &mut Frame) {}
        }

        let mut shell = Shell {
            counter: Counter { count: 0 },
        };
        let (tx, rx) = mpsc::channel();
        let mut quit = false;
        process(&mut shell, Cmd::msg(Outer::Inner(Msg::AddTwice(3))), &tx, &mut quit);
        assert_eq!(shell.counter.count, 6);

        let mapped: Cmd<Outer> = Cmd::task(|| Msg::Add(2)).map(Outer::Inner);
        process(&mut shell, mapped, &tx, &mut quit);
        let Outer::Inner(Msg::Add(2)) = rx.recv_timeout(Duration::from_secs(2)).unwrap() else {
            panic!("expected wrapped task result");
        };
    }

    #[test]
    fn none_changes_nothing() {
        let mut model = Counter { count: 5 };
        let (_, quit) = drive(&mut model, Cmd::none());
        assert_eq!(model.count, 5);
        assert!(!quit);
    }
}
