use crate::config::UiConfig;
use crate::files::{expand_home, read_upload};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use daisy_core::assistant::{Mode, Responder};
use daisy_core::command::{CommandId, SlashCommand, palette_matches, parse_command};
use daisy_core::conversation::Conversation;
use daisy_core::render::PROCESSING_NOTICE;
use daisy_core::suggest::select_suggestions;
use daisy_core::types::{AttachmentKind, Message, Sender as MessageSender, Suggestion};
use daisy_core::upload::{UploadTray, UploadedFile, size_label};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use std::collections::VecDeque;
use std::io;
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
use std::thread;
use std::time::Duration;

/// Work handed to the responder thread. One job is in flight at a time.
pub enum Job {
    Chat { text: String, prior: Vec<Message> },
    Upload(UploadedFile),
}

pub enum UiEvent {
    Reply(String),
}

pub struct TuiContext {
    pub responder: Responder,
    pub ui_config: UiConfig,
    pub provider_label: String,
}

#[derive(Debug, Clone)]
struct UiTheme {
    accent: Color,
    user: Color,
    assistant: Color,
    heading: Color,
    muted: Color,
    neutral: Color,
}

impl UiTheme {
    fn from_config(config: &UiConfig) -> Self {
        match config.color_theme.as_str() {
            "mono" => Self::mono(),
            _ => Self::minimal(),
        }
    }

    fn minimal() -> Self {
        Self {
            accent: Color::Rgb(230, 190, 60),
            user: Color::Rgb(170, 170, 170),
            assistant: Color::Rgb(80, 200, 200),
            heading: Color::Rgb(140, 140, 140),
            muted: Color::Rgb(110, 110, 110),
            neutral: Color::Rgb(210, 210, 210),
        }
    }

    fn mono() -> Self {
        Self {
            accent: Color::White,
            user: Color::Gray,
            assistant: Color::White,
            heading: Color::Gray,
            muted: Color::DarkGray,
            neutral: Color::White,
        }
    }
}

/// Chat screen state, kept free of terminal handles so key handling is testable.
struct ChatApp {
    conversation: Conversation,
    tray: UploadTray,
    queued_uploads: VecDeque<UploadedFile>,
    input: String,
    pending: Option<PendingKind>,
    suggestion_index: Option<usize>,
    palette_index: usize,
    notice: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingKind {
    Chat,
    Upload(AttachmentKind),
}

impl PendingKind {
    fn status_text(self) -> String {
        match self {
            Self::Chat => "Daisy is typing...".to_string(),
            Self::Upload(AttachmentKind::Audio) => PROCESSING_NOTICE.to_string(),
            Self::Upload(kind) => format!("Daisy is looking at your {}...", kind.label()),
        }
    }
}

impl ChatApp {
    fn new() -> Self {
        Self {
            conversation: Conversation::new(),
            tray: UploadTray::new(),
            queued_uploads: VecDeque::new(),
            input: String::new(),
            pending: None,
            suggestion_index: None,
            palette_index: 0,
            notice: None,
        }
    }

    fn suggestions(&self) -> Vec<Suggestion> {
        select_suggestions(self.conversation.messages(), &self.input)
    }

    fn palette(&self) -> Vec<&'static SlashCommand> {
        palette_matches(&self.input)
    }

    fn type_char(&mut self, ch: char) {
        self.input.push(ch);
        self.suggestion_index = None;
        self.palette_index = 0;
    }

    fn backspace(&mut self) {
        self.input.pop();
        self.suggestion_index = None;
        self.palette_index = 0;
    }

    fn cycle_suggestion(&mut self) {
        let count = self.suggestions().len();
        if count == 0 {
            self.suggestion_index = None;
            return;
        }
        self.suggestion_index = Some(match self.suggestion_index {
            Some(index) => (index + 1) % count,
            None => 0,
        });
    }

    fn move_palette(&mut self, down: bool) {
        let count = self.palette().len();
        if count == 0 {
            return;
        }
        self.palette_index = if down {
            (self.palette_index + 1) % count
        } else {
            (self.palette_index + count - 1) % count
        };
    }

    /// Replace a partial command name with the highlighted palette entry.
    /// Returns false when the input already names that command.
    fn complete_palette(&mut self) -> bool {
        let palette = self.palette();
        let Some(command) = palette.get(self.palette_index.min(palette.len().saturating_sub(1)))
        else {
            return false;
        };
        if self.input.trim() == command.prefix {
            return false;
        }
        self.input = format!("{} ", command.prefix);
        self.palette_index = 0;
        true
    }

    /// Handle Enter. Returns a job for the responder thread when one is needed.
    fn submit(&mut self) -> Option<Job> {
        if self.pending.is_some() {
            self.notice = Some("waiting for the current reply".into());
            return None;
        }
        if !self.palette().is_empty() && self.complete_palette() {
            return None;
        }

        let mut text = std::mem::take(&mut self.input);
        if text.trim().is_empty() {
            match self
                .suggestion_index
                .and_then(|i| self.suggestions().get(i).copied())
            {
                Some(suggestion) => text = suggestion.text.to_string(),
                None => return None,
            }
        }
        self.suggestion_index = None;
        self.notice = None;

        if let Some(command) = parse_command(&text) {
            return self.run_command(command.id, command.argument.as_deref());
        }
        self.start_chat(&text)
    }

    fn start_chat(&mut self, text: &str) -> Option<Job> {
        let prior = self.conversation.messages().to_vec();
        let message = self.conversation.push_user(text)?;
        let text = message.content.clone();
        self.pending = Some(PendingKind::Chat);
        Some(Job::Chat { text, prior })
    }

    fn run_command(&mut self, id: CommandId, argument: Option<&str>) -> Option<Job> {
        if let Some(prompt) = id.preset_prompt() {
            return self.start_chat(prompt);
        }
        match id {
            CommandId::Upload => {
                let Some(path) = argument else {
                    self.notice = Some("usage: /upload <path>".into());
                    return None;
                };
                match read_upload(&expand_home(path)) {
                    Ok(file) => {
                        let added = self.tray.add(file);
                        self.notice = Some(format!(
                            "added {} ({}); /transcribe to send",
                            added.name, added.size_label
                        ));
                    }
                    Err(err) => {
                        tracing::warn!(path, error = %err, "upload failed");
                        self.notice = Some(format!("could not read {path}: {err}"));
                    }
                }
                None
            }
            CommandId::Transcribe => {
                if self.tray.is_empty() {
                    self.notice = Some("upload tray is empty; use /upload <path>".into());
                    return None;
                }
                self.queued_uploads.extend(self.tray.drain());
                self.next_upload()
            }
            CommandId::Remove => {
                let index = argument
                    .and_then(|value| value.parse::<usize>().ok())
                    .and_then(|n| n.checked_sub(1));
                let id = index
                    .and_then(|index| self.tray.id_at(index))
                    .map(str::to_string);
                match id.and_then(|id| self.tray.remove(&id)) {
                    Some(file) => self.notice = Some(format!("removed {}", file.name)),
                    None => self.notice = Some("usage: /remove <number from tray>".into()),
                }
                None
            }
            CommandId::Schedule | CommandId::Integrations => None,
        }
    }

    fn next_upload(&mut self) -> Option<Job> {
        let file = self.queued_uploads.pop_front()?;
        self.conversation.push_upload(&file);
        self.pending = Some(PendingKind::Upload(file.kind));
        Some(Job::Upload(file))
    }

    /// Record a reply and start the next queued upload, if any.
    fn on_reply(&mut self, reply: String) -> Option<Job> {
        self.conversation.push_assistant(reply);
        self.pending = None;
        self.next_upload()
    }
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen);
    }
}

fn spawn_responder(
    mut responder: Responder,
    jobs: Receiver<Job>,
    events: Sender<UiEvent>,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("daisy-responder".into())
        .spawn(move || {
            while let Ok(job) = jobs.recv() {
                let reply = match job {
                    Job::Chat { text, prior } => responder.reply(&text, &prior),
                    Job::Upload(file) => responder.handle_upload(&file),
                };
                if events.send(UiEvent::Reply(reply)).is_err() {
                    break;
                }
            }
        })
}

pub fn run(ctx: TuiContext) -> Result<(), Box<dyn std::error::Error>> {
    let mode = ctx.responder.mode();
    let (job_tx, job_rx) = channel();
    let (ui_tx, ui_rx) = channel();
    let _worker = spawn_responder(ctx.responder, job_rx, ui_tx)?;

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = TerminalGuard;

    // Panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = terminal::disable_raw_mode();
        let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = UiTheme::from_config(&ctx.ui_config);
    let mut app = ChatApp::new();
    let mut worker_alive = true;
    tracing::info!(mode = mode.label(), provider = %ctx.provider_label, "chat started");

    loop {
        loop {
            match ui_rx.try_recv() {
                Ok(UiEvent::Reply(reply)) => {
                    if let Some(job) = app.on_reply(reply) {
                        dispatch(&job_tx, job, &mut app);
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if worker_alive {
                        tracing::error!("responder thread stopped");
                        app.notice = Some("assistant stopped; restart daisy".into());
                        app.pending = None;
                        worker_alive = false;
                    }
                    break;
                }
            }
        }

        terminal.draw(|frame| {
            let palette = app.palette();
            let suggestions = if ctx.ui_config.show_suggestions && palette.is_empty() {
                app.suggestions()
            } else {
                Vec::new()
            };
            let tray_height = if app.tray.is_empty() { 0 } else { 1 };
            let suggestion_height = if suggestions.is_empty() { 0 } else { 1 };

            let [
                title_area,
                messages_area,
                tray_area,
                suggestion_area,
                input_area,
                footer_area,
            ] = Layout::vertical([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(tray_height),
                Constraint::Length(suggestion_height),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .areas(frame.area());

            render_title_bar(frame, title_area, &theme);
            let lines = render_message_lines(&app, &theme, ctx.ui_config.show_timestamps);
            render_scrolled_paragraph(frame, messages_area, &lines);
            if tray_height > 0 {
                render_tray(frame, tray_area, &app.tray, &theme);
            }
            if suggestion_height > 0 {
                render_suggestions(
                    frame,
                    suggestion_area,
                    &suggestions,
                    app.suggestion_index,
                    &theme,
                );
            }
            render_input(frame, input_area, &app.input, &theme);
            render_footer(frame, footer_area, &theme, &app, mode, &ctx.provider_label);
            if !palette.is_empty() {
                render_palette(frame, input_area, &palette, app.palette_index, &theme);
            }
        })?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            break;
        }

        match key.code {
            KeyCode::Esc => {
                if app.input.is_empty() {
                    break;
                }
                app.input.clear();
                app.suggestion_index = None;
            }
            KeyCode::Enter => {
                if let Some(job) = app.submit() {
                    dispatch(&job_tx, job, &mut app);
                }
            }
            KeyCode::Tab => {
                if app.palette().is_empty() {
                    app.cycle_suggestion();
                } else {
                    app.complete_palette();
                }
            }
            KeyCode::Up => app.move_palette(false),
            KeyCode::Down => app.move_palette(true),
            KeyCode::Backspace => app.backspace(),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.type_char(ch);
            }
            _ => {}
        }
    }

    Ok(())
}

fn dispatch(job_tx: &Sender<Job>, job: Job, app: &mut ChatApp) {
    if job_tx.send(job).is_err() {
        tracing::error!("responder thread is gone; dropping request");
        app.pending = None;
        app.notice = Some("assistant stopped; restart daisy".into());
    }
}

fn render_title_bar(frame: &mut ratatui::Frame, area: Rect, theme: &UiTheme) {
    let hint = "enter send  tab suggest  / commands  esc quit";
    let hint_len = hint.len() as u16;
    let [left, right] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(hint_len + 1)]).areas(area);

    let version = daisy_core::version();
    let left_line = Line::from(vec![
        Span::styled("✿ ", Style::default().fg(theme.accent)),
        Span::styled(
            format!("daisy v{version}"),
            Style::default().fg(theme.accent),
        ),
    ]);
    let right_line = Line::from(Span::styled(hint, Style::default().fg(theme.muted)));

    frame.render_widget(Paragraph::new(left_line), left);
    frame.render_widget(
        Paragraph::new(right_line).alignment(Alignment::Right),
        right,
    );
}

fn render_message_lines(
    app: &ChatApp,
    theme: &UiTheme,
    show_timestamps: bool,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for message in app.conversation.messages() {
        let (name, color) = match message.sender {
            MessageSender::User => ("You", theme.user),
            MessageSender::Assistant => ("Daisy", theme.assistant),
        };
        let mut header = vec![Span::styled(
            name,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )];
        if show_timestamps {
            header.push(Span::styled(
                format!(" {}", format_time(message)),
                Style::default().fg(theme.muted),
            ));
        }
        lines.push(Line::from(header));

        if let Some(attachment) = &message.attachment {
            lines.push(Line::from(Span::styled(
                format!(
                    "[{}] {} ({})",
                    attachment.kind.label(),
                    attachment.name,
                    size_label(attachment.size_bytes)
                ),
                Style::default().fg(theme.heading),
            )));
        }
        for text in message.content.lines() {
            lines.push(Line::from(Span::styled(
                text.to_string(),
                Style::default().fg(theme.neutral),
            )));
        }
        lines.push(Line::default());
    }

    if let Some(kind) = app.pending {
        lines.push(Line::from(Span::styled(
            kind.status_text(),
            Style::default().fg(theme.muted),
        )));
    }
    lines
}

fn format_time(message: &Message) -> String {
    format!(
        "{:02}:{:02}",
        message.timestamp.hour(),
        message.timestamp.minute()
    )
}

fn render_tray(frame: &mut ratatui::Frame, area: Rect, tray: &UploadTray, theme: &UiTheme) {
    let mut spans = vec![Span::styled("tray ", Style::default().fg(theme.heading))];
    for (index, file) in tray.iter().enumerate() {
        spans.push(Span::styled(
            format!(
                "{}. {} ({}, {})  ",
                index + 1,
                file.name,
                file.kind.label(),
                file.size_label
            ),
            Style::default().fg(theme.neutral),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_suggestions(
    frame: &mut ratatui::Frame,
    area: Rect,
    suggestions: &[Suggestion],
    selected: Option<usize>,
    theme: &UiTheme,
) {
    let mut spans = Vec::new();
    for (index, suggestion) in suggestions.iter().enumerate() {
        let style = if selected == Some(index) {
            Style::default().fg(Color::Black).bg(theme.accent)
        } else {
            Style::default().fg(theme.muted)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} ", suggestion.text), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_input(frame: &mut ratatui::Frame, area: Rect, input: &str, theme: &UiTheme) {
    let body = if input.is_empty() {
        Line::from(Span::styled(
            "Ask Daisy anything, or type / for commands",
            Style::default().fg(theme.muted),
        ))
    } else {
        Line::from(input.to_string())
    };
    let widget = Paragraph::new(body).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted)),
    );
    frame.render_widget(widget, area);

    let visible = area.width.saturating_sub(3) as usize;
    let cursor = input.chars().count().min(visible) as u16;
    frame.set_cursor_position((area.x + 1 + cursor, area.y + 1));
}

fn render_footer(
    frame: &mut ratatui::Frame,
    area: Rect,
    theme: &UiTheme,
    app: &ChatApp,
    mode: Mode,
    provider: &str,
) {
    let state = match app.pending {
        Some(_) => "waiting",
        None => "ready",
    };
    let status = format!("mode:{} provider:{provider} {state}", mode.label());
    let notice = app.notice.clone().unwrap_or_default();

    let [left, right] = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(status.len() as u16 + 1),
    ])
    .areas(area);
    frame.render_widget(
        Paragraph::new(notice).style(Style::default().fg(theme.accent)),
        left,
    );
    frame.render_widget(
        Paragraph::new(status)
            .alignment(Alignment::Right)
            .style(Style::default().fg(theme.muted)),
        right,
    );
}

fn render_palette(
    frame: &mut ratatui::Frame,
    input_area: Rect,
    commands: &[&'static SlashCommand],
    selected: usize,
    theme: &UiTheme,
) {
    let height = commands.len() as u16 + 2;
    let width = 60.min(input_area.width);
    let area = Rect {
        x: input_area.x,
        y: input_area.y.saturating_sub(height),
        width,
        height: height.min(input_area.y),
    };
    frame.render_widget(Clear, area);

    let selected = selected.min(commands.len().saturating_sub(1));
    let lines: Vec<Line<'static>> = commands
        .iter()
        .enumerate()
        .map(|(index, command)| {
            let label = format!("{:<18}", command.usage);
            if index == selected {
                Line::from(vec![
                    Span::styled(label, Style::default().fg(Color::Black).bg(theme.accent)),
                    Span::styled(
                        command.description,
                        Style::default().fg(Color::Black).bg(theme.accent),
                    ),
                ])
            } else {
                Line::from(vec![
                    Span::styled(label, Style::default().fg(theme.neutral)),
                    Span::styled(command.description, Style::default().fg(theme.muted)),
                ])
            }
        })
        .collect();

    let widget = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled("commands", Style::default().fg(theme.heading))),
    );
    frame.render_widget(widget, area);
}

fn render_scrolled_paragraph(frame: &mut ratatui::Frame, area: Rect, lines: &[Line<'static>]) {
    let padded = pad_lines(lines);
    let height = wrapped_height(&padded, area.width);
    let scroll = height.saturating_sub(area.height as usize) as u16;
    let paragraph = Paragraph::new(Text::from(padded))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn pad_lines(lines: &[Line<'static>]) -> Vec<Line<'static>> {
    lines
        .iter()
        .cloned()
        .map(|line| {
            let mut spans = vec![Span::raw(" ")];
            spans.extend(line.spans);
            Line::from(spans)
        })
        .collect()
}

/// Rows the lines occupy once wrapped to `width`. Approximate for wide glyphs.
fn wrapped_height(lines: &[Line<'static>], width: u16) -> usize {
    let width = width.max(1) as usize;
    lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(width))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn typed(app: &mut ChatApp, text: &str) {
        for ch in text.chars() {
            app.type_char(ch);
        }
    }

    #[test]
    fn blank_enter_does_nothing() {
        let mut app = ChatApp::new();
        typed(&mut app, "   ");
        assert!(app.submit().is_none());
        assert_eq!(app.conversation.len(), 1);
        assert!(app.pending.is_none());
    }

    #[test]
    fn chat_submit_carries_prior_history() {
        let mut app = ChatApp::new();
        typed(&mut app, " hello ");
        let Some(Job::Chat { text, prior }) = app.submit() else {
            panic!("expected chat job");
        };
        assert_eq!(text, "hello");
        assert_eq!(prior.len(), 1);
        assert_eq!(app.conversation.len(), 2);
        assert!(app.input.is_empty());

        typed(&mut app, "again");
        assert!(app.submit().is_none());
        assert!(app.notice.is_some());
    }

    #[test]
    fn enter_on_empty_input_sends_highlighted_suggestion() {
        let mut app = ChatApp::new();
        app.cycle_suggestion();
        app.cycle_suggestion();
        let expected = app.suggestions()[1].text;
        let Some(Job::Chat { text, .. }) = app.submit() else {
            panic!("expected chat job");
        };
        assert_eq!(text, expected);
    }

    #[test]
    fn palette_completes_then_runs_shortcut() {
        let mut app = ChatApp::new();
        typed(&mut app, "/sch");
        assert_eq!(app.palette().len(), 1);
        assert!(app.submit().is_none());
        assert_eq!(app.input, "/schedule ");

        let Some(Job::Chat { text, .. }) = app.submit() else {
            panic!("expected chat job");
        };
        assert_eq!(text, "Schedule a new meeting");
    }

    #[test]
    fn upload_transcribe_and_remove_flow() {
        let temp = tempfile::tempdir().unwrap();
        let audio = temp.path().join("standup.mp3");
        let notes = temp.path().join("notes.pdf");
        fs::write(&audio, b"ID3").unwrap();
        fs::write(&notes, b"%PDF").unwrap();

        let mut app = ChatApp::new();
        for path in [&audio, &notes, &audio] {
            app.input = format!("/upload {}", path.display());
            assert!(app.submit().is_none());
        }
        assert_eq!(app.tray.len(), 3);

        app.input = "/remove 3".into();
        assert!(app.submit().is_none());
        assert_eq!(app.tray.len(), 2);

        app.input = "/transcribe".into();
        let Some(Job::Upload(first)) = app.submit() else {
            panic!("expected upload job");
        };
        assert_eq!(first.name, "standup.mp3");
        assert!(app.tray.is_empty());
        assert_eq!(
            app.pending,
            Some(PendingKind::Upload(AttachmentKind::Audio))
        );

        let Some(Job::Upload(second)) = app.on_reply("summary".into()) else {
            panic!("expected queued upload");
        };
        assert_eq!(second.name, "notes.pdf");
        let pending = app.pending.unwrap();
        assert_eq!(pending, PendingKind::Upload(AttachmentKind::Document));
        assert_eq!(
            pending.status_text(),
            "Daisy is looking at your document..."
        );
        assert!(app.on_reply("ack".into()).is_none());
        assert!(app.pending.is_none());
        assert_eq!(app.conversation.user_message_count(), 2);
    }

    #[test]
    fn transcribe_with_empty_tray_sets_notice() {
        let mut app = ChatApp::new();
        app.input = "/transcribe".into();
        assert!(app.submit().is_none());
        assert!(app.notice.as_deref().unwrap().contains("empty"));
    }

    #[test]
    fn pending_text_matches_upload_kind() {
        assert_eq!(
            PendingKind::Upload(AttachmentKind::Audio).status_text(),
            PROCESSING_NOTICE
        );
        assert!(
            PendingKind::Upload(AttachmentKind::Image)
                .status_text()
                .contains("image")
        );
        assert!(
            !PendingKind::Upload(AttachmentKind::Image)
                .status_text()
                .contains("audio")
        );
    }

    #[test]
    fn wrapped_height_counts_wrapped_rows() {
        let lines = vec![Line::from("a".repeat(25)), Line::default()];
        assert_eq!(wrapped_height(&lines, 10), 4);
    }
}
