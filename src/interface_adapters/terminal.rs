use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::domain::entities::{AuthMethod, AuthMode, AuthStep, Message, Role, Route};
use crate::interface_adapters::state::AppState;
use crate::use_cases::{AuthFlow, ChatExchange, ChatOutcome, Navigation, RouteGuard, Sidebar};

const BANNER: &str = "\
GEN AI  |  Next-Gen Conversational Intelligence

  Intelligence Reimagined.

  Real-time Flow      fast answers from the GEN AI backend
  Secure by Design    one-time passcode sign-in
  Anywhere            runs wherever your terminal does

Type `login` to sign in, `chat` to open your conversations, `/quit` to leave.";

const CHAT_HELP: &str =
    "Commands: /new  /recent  /open <n>  /logout  /quit. Anything else is sent to GEN AI.";

// Line-oriented front end: landing, login, and chat pages over any byte streams.
pub struct Shell<R, W> {
    state: AppState,
    lines: Lines<R>,
    out: W,
    interrupts: Option<mpsc::UnboundedReceiver<()>>,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(state: AppState, input: R, out: W) -> Self {
        Self {
            state,
            lines: input.lines(),
            out,
            interrupts: None,
        }
    }

    // Ctrl-C abandons the pending chat request; at a prompt it ends the shell.
    // Must be called inside a tokio runtime.
    pub fn cancel_on_ctrl_c(self) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                if tx.send(()).is_err() {
                    break;
                }
            }
        });
        self.with_interrupts(rx)
    }

    // Each message on `interrupts` counts as one Ctrl-C.
    pub fn with_interrupts(mut self, interrupts: mpsc::UnboundedReceiver<()>) -> Self {
        self.interrupts = Some(interrupts);
        self
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    // Drive navigation from `start` until the user quits or input ends.
    pub async fn run(&mut self, start: &str) -> io::Result<()> {
        let guard = RouteGuard {
            store: self.state.store.clone(),
        };
        let mut path = start.to_string();

        loop {
            let navigation = guard.resolve(&path).await;
            if let Navigation::Redirect(route) = navigation {
                debug!(from = %path, to = route.path(), "redirecting.");
            }

            let next = match navigation.target() {
                Route::Landing => self.landing().await?,
                Route::Login => self.login().await?,
                Route::Chat => self.chat().await?,
            };
            match next {
                Some(next) => path = next,
                None => return Ok(()),
            }
        }
    }

    async fn landing(&mut self) -> io::Result<Option<String>> {
        self.say(BANNER).await?;
        loop {
            self.prompt().await?;
            let Some(raw) = self.read_line().await? else {
                return Ok(None);
            };
            match raw.trim() {
                "/quit" => return Ok(None),
                "login" | "sign in" | "get started" => return Ok(Some(Route::Login.path().into())),
                "chat" => return Ok(Some(Route::Chat.path().into())),
                path if path.starts_with('/') => return Ok(Some(path.to_string())),
                "" => {}
                _ => self.say("Type `login`, `chat`, or `/quit`.").await?,
            }
        }
    }

    async fn login(&mut self) -> io::Result<Option<String>> {
        let mut flow = AuthFlow::new(self.state.auth.clone(), self.state.store.clone());
        let mut show_header = true;

        loop {
            if show_header {
                self.say(&format!("\nGEN AI  |  {}", flow.form().mode().tagline()))
                    .await?;
                show_header = false;
            }
            self.login_prompt(flow.form().step(), flow.form().method(), flow.form().mode())
                .await?;

            let Some(raw) = self.read_line().await? else {
                return Ok(None);
            };
            let line = raw.trim();
            match line {
                "/quit" => return Ok(None),
                "/home" => return Ok(Some(Route::Landing.path().into())),
                "/login" => {
                    flow.set_mode(AuthMode::Login);
                    show_header = true;
                }
                "/signup" => {
                    flow.set_mode(AuthMode::Signup);
                    show_header = true;
                }
                "/email" => flow.set_method(AuthMethod::Email),
                "/mobile" => flow.set_method(AuthMethod::Mobile),
                "/back" => flow.change_details(),
                _ => {
                    let result = match flow.step() {
                        AuthStep::Input => {
                            flow.set_identifier(line);
                            flow.submit_identifier().await
                        }
                        AuthStep::AwaitingOtp => {
                            flow.set_code(line);
                            flow.submit_code().await
                        }
                        AuthStep::Authenticated => Ok(()),
                    };

                    match result {
                        Ok(()) if flow.step() == AuthStep::Authenticated => {
                            self.say("Signed in.").await?;
                            return Ok(Some(Route::Chat.path().into()));
                        }
                        Ok(()) => {}
                        Err(err) => {
                            if let Some(notice) = err.notice() {
                                self.say(&format!("! {notice}")).await?;
                            }
                        }
                    }
                }
            }
        }
    }

    async fn login_prompt(
        &mut self,
        step: AuthStep,
        method: AuthMethod,
        mode: AuthMode,
    ) -> io::Result<()> {
        let text = match step {
            AuthStep::Input => format!(
                "{} ({}), or /email /mobile /login /signup:",
                method.label(),
                method.placeholder()
            ),
            AuthStep::AwaitingOtp => format!(
                "Code (000000) to {}, or /back to change details:",
                mode.submit_label()
            ),
            AuthStep::Authenticated => return Ok(()),
        };
        self.say(&text).await?;
        self.prompt().await
    }

    async fn chat(&mut self) -> io::Result<Option<String>> {
        let mut exchange = ChatExchange::new(self.state.chat.clone(), self.state.store.clone());
        let mut sidebar = Sidebar::new(self.state.store.clone());

        self.say(CHAT_HELP).await?;
        self.show_messages(exchange.messages()).await?;

        loop {
            self.prompt().await?;
            let Some(raw) = self.read_line().await? else {
                return Ok(None);
            };
            let command = raw.trim();
            match command {
                "/quit" => return Ok(None),
                "/logout" => match sidebar.sign_out().await {
                    Ok(()) => return Ok(Some(Route::Login.path().into())),
                    Err(err) => {
                        error!(error = %err, "failed to sign out.");
                        self.say("! Failed to sign out.").await?;
                    }
                },
                "/new" => {
                    if sidebar.new_conversation(exchange.transcript_mut()) {
                        self.say("-- new conversation --").await?;
                        self.show_messages(exchange.messages()).await?;
                    }
                }
                "/recent" => {
                    if sidebar.recent().is_empty() {
                        self.say("No recent chats.").await?;
                    }
                    let listing: Vec<String> = sidebar
                        .recent()
                        .iter()
                        .enumerate()
                        .map(|(i, summary)| {
                            format!(
                                "  {}. {} ({} messages)",
                                i + 1,
                                summary.title,
                                summary.message_count()
                            )
                        })
                        .collect();
                    for line in listing {
                        self.say(&line).await?;
                    }
                }
                _ if command == "/open" || command.starts_with("/open ") => {
                    let index = command["/open".len()..]
                        .trim()
                        .parse::<usize>()
                        .ok()
                        .and_then(|n| n.checked_sub(1));
                    let opened = match index {
                        Some(index) => sidebar.open(index, exchange.transcript_mut()),
                        None => false,
                    };
                    if opened {
                        self.show_messages(exchange.messages()).await?;
                    } else {
                        self.say("! No such conversation.").await?;
                    }
                }
                _ => {
                    let Some(turn) = exchange.begin_turn(&raw) else {
                        continue;
                    };
                    self.say("GEN AI is thinking...").await?;

                    let cancel = CancellationToken::new();
                    let outcome = {
                        let resolve = exchange.resolve_turn(turn, &cancel);
                        tokio::pin!(resolve);
                        loop {
                            tokio::select! {
                                outcome = &mut resolve => break outcome,
                                () = interrupted(&mut self.interrupts) => cancel.cancel(),
                            }
                        }
                    };

                    match outcome {
                        ChatOutcome::Replied | ChatOutcome::Fallback(_) => {
                            if let Some(reply) = exchange.messages().last() {
                                let reply = render(reply);
                                self.say(&reply).await?;
                            }
                        }
                        ChatOutcome::Cancelled => self.say("(request cancelled)").await?,
                        ChatOutcome::Ignored => {}
                    }
                }
            }
        }
    }

    // Next input line, or `None` when input ends or an interrupt arrives first.
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        tokio::select! {
            biased;
            line = self.lines.next_line() => line,
            () = interrupted(&mut self.interrupts) => {
                debug!("interrupted at prompt.");
                Ok(None)
            }
        }
    }

    async fn show_messages(&mut self, messages: &[Message]) -> io::Result<()> {
        let rendered: Vec<String> = messages.iter().map(render).collect();
        for line in rendered {
            self.say(&line).await?;
        }
        Ok(())
    }

    async fn prompt(&mut self) -> io::Result<()> {
        self.out.write_all(b"> ").await?;
        self.out.flush().await
    }

    async fn say(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await
    }
}

// Pends forever without an interrupt source or once its sender is gone.
async fn interrupted(interrupts: &mut Option<mpsc::UnboundedReceiver<()>>) {
    match interrupts {
        Some(rx) => {
            if rx.recv().await.is_none() {
                std::future::pending::<()>().await;
            }
        }
        None => std::future::pending::<()>().await,
    }
}

fn render(message: &Message) -> String {
    match message.role {
        Role::User => format!("you> {}", message.content),
        Role::Assistant => format!("GEN AI> {}", message.content),
    }
}
