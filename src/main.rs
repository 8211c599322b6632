//! SwipeVote - swipe through ongoing referenda in the terminal
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering and input
//! - App Layer - voting session state machine processing events
//! - Network Layer (Tokio) - chain connection and timed referenda fetch

mod models;
mod config;
mod ui;
mod chain;
mod messages;
mod app;
mod network;
mod constants;

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use app::{AppActor, SessionPhase};
use config::Config;
use constants::{APP_NAME, APP_VERSION};
use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
use messages::ui_events::{key_to_ui_event, SwipeTracker};
use models::{Network, ReferendumIndex, ReferendumOngoing, Track};
use network::NetworkActor;
use ui::{format_balance, format_blocks, render_action_bar, render_votes_table};

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
    }
}

/// Per-frame UI state that never leaves the UI loop
#[derive(Default)]
struct ViewState {
    tick: usize,
    drag_offset: i32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?.with_args(std::env::args().skip(1));

    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", &config.log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(
        endpoint = %config.endpoint,
        network = ?config.resolved_network(),
        timeout_ms = config.fetch_timeout_ms,
        "Starting {} {}", APP_NAME, APP_VERSION
    );

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(net_resp_tx, config.fetch_timeout());
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(&config, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();
    let mut view = ViewState::default();
    let mut swipe = SwipeTracker::new();

    loop {
        view.tick = view.tick.wrapping_add(1);
        terminal.draw(|f| draw_ui(f, &current_state, &view))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            let ui_event = match event::read()? {
                Event::Key(key) => key_to_ui_event(key, current_state.show_help),
                Event::Mouse(mouse) => {
                    if let MouseEventKind::Drag(_) = mouse.kind {
                        view.drag_offset = swipe.offset(mouse.column);
                    }
                    let event = swipe.handle(mouse);
                    if !swipe.is_dragging() {
                        view.drag_offset = 0;
                    }
                    event
                }
                _ => None,
            };

            if let Some(event) = ui_event {
                let quit = matches!(event, UiEvent::Quit);
                let _ = ui_tx.send(event);
                if quit {
                    break;
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState, view: &ViewState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Header
            Constraint::Min(0),     // Content
            Constraint::Length(1),  // Error line
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_header(f, state, main_chunks[0]);

    match state.phase {
        SessionPhase::Summary => draw_summary(f, state, main_chunks[1]),
        SessionPhase::Voting if state.remaining == 0 => draw_loading(f, state, view, main_chunks[1]),
        SessionPhase::Voting => draw_voting(f, state, view, main_chunks[1]),
    }

    if let Some(error) = &state.error {
        let line = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red).bold())
            .alignment(Alignment::Center);
        f.render_widget(line, main_chunks[2]);
    }

    draw_status_bar(f, state, main_chunks[3]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_header(f: &mut Frame, state: &RenderState, area: Rect) {
    let (indicator, color) = if state.connected {
        ("[+]", Color::Green)
    } else {
        ("[-]", Color::DarkGray)
    };
    let network = state.network.map(|n| n.as_str()).unwrap_or("unknown network");
    let since = state
        .connected_at
        .map(|t| format!(" since {}", t.format("%H:%M:%S")))
        .unwrap_or_default();

    let header = Line::from(vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::Black).bg(Color::Magenta).bold()),
        Span::raw(" "),
        Span::styled(indicator, Style::default().fg(color)),
        Span::raw(format!(" {} · {}{}", network, state.endpoint, since)),
    ]);
    f.render_widget(Paragraph::new(header), area);
}

fn draw_loading(f: &mut Frame, state: &RenderState, view: &ViewState, area: Rect) {
    let box_area = centered_rect(60, 40, area);

    let mut lines = Vec::new();
    if state.is_loading || !state.connected {
        let frame = SPINNER[(view.tick / 2) % SPINNER.len()];
        lines.push(Line::from(Span::styled(frame, Style::default().fg(Color::Magenta).bold())));
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("Get ready to vote!", Style::default().bold())));
    } else {
        lines.push(Line::from(Span::styled(
            "No ongoing referenda to vote on.",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("Press 'r' to reload.", Style::default().fg(Color::DarkGray))));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().padding(Padding::top(box_area.height / 3)));
    f.render_widget(paragraph, box_area);
}

fn draw_voting(f: &mut Frame, state: &RenderState, view: &ViewState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),    // Card
            Constraint::Length(3),  // Action bar
        ])
        .split(area);

    let card_area = shifted(centered_rect(70, 100, chunks[0]), view.drag_offset, chunks[0]);

    match (&state.topmost, state.network) {
        (Some((index, referendum)), Some(network)) => {
            draw_card(f, *index, referendum, state.topmost_track.as_ref(), network, view.drag_offset, card_area);
        }
        (Some((index, _)), None) => {
            let placeholder = Paragraph::new("Network not identified.\n\nSet `network` in ~/.swipevote/config.yaml to see referendum details.")
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title(format!(" Referendum #{} ", index)));
            f.render_widget(placeholder, card_area);
        }
        (None, _) => {}
    }

    f.render_widget(render_action_bar(state.remaining), chunks[1]);
}

fn draw_card(
    f: &mut Frame,
    index: ReferendumIndex,
    referendum: &ReferendumOngoing,
    track: Option<&Track>,
    network: Network,
    drag_offset: i32,
    area: Rect,
) {
    let border_color = match drag_offset {
        d if d >= constants::SWIPE_THRESHOLD as i32 => Color::Green,
        d if d <= -(constants::SWIPE_THRESHOLD as i32) => Color::Red,
        _ => Color::Cyan,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(format!(" Referendum #{} ", index))
        .title_style(Style::default().fg(Color::Yellow).bold());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let label = |text: &'static str| Span::styled(format!("{:<12}", text), Style::default().fg(Color::DarkGray));

    let track_line = match track {
        Some(t) => format!("{} (#{}) · decides in {} · max {} deciding", t.name, t.id, format_blocks(t.decision_period), t.max_deciding),
        None => format!("Unknown track (#{})", referendum.track),
    };

    let status = match (&referendum.deciding, referendum.in_queue) {
        (Some(deciding), _) => match deciding.confirming {
            Some(until) => format!("Confirming until #{}", until),
            None => format!("Deciding since #{}", deciding.since),
        },
        (None, true) => String::from("Queued for a decision slot"),
        (None, false) => String::from("Preparing"),
    };

    let decision_deposit = match &referendum.decision_deposit {
        Some(deposit) => format!("{} by {}", format_balance(deposit.amount, network), deposit.who),
        None => match track {
            Some(t) => format!("not placed (needs {})", format_balance(t.decision_deposit, network)),
            None => String::from("not placed"),
        },
    };

    let enactment = match referendum.enactment {
        Some(models::Enactment::After(blocks)) => format!("{} after approval", format_blocks(blocks)),
        Some(models::Enactment::At(block)) => format!("at block #{}", block),
        None => String::from("-"),
    };

    let tally = &referendum.tally;
    let lines = vec![
        Line::from(vec![label("Track"), Span::raw(track_line)]),
        Line::from(vec![label("Origin"), Span::raw(referendum.origin_label())]),
        Line::from(vec![label("Proposal"), Span::raw(referendum.proposal.summary())]),
        Line::from(vec![label("Submitted"), Span::raw(format!("#{}", referendum.submitted))]),
        Line::from(vec![label("Status"), Span::styled(status, Style::default().fg(Color::Cyan))]),
        Line::from(vec![label("Deposit"), Span::raw(decision_deposit)]),
        Line::from(vec![label("Enactment"), Span::raw(enactment)]),
        Line::raw(""),
        Line::from(vec![label("Ayes"), Span::styled(format_balance(tally.ayes, network), Style::default().fg(Color::Green))]),
        Line::from(vec![label("Nays"), Span::styled(format_balance(tally.nays, network), Style::default().fg(Color::Red))]),
        Line::from(vec![label("Support"), Span::raw(format_balance(tally.support, network))]),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), parts[0]);

    let gauge = match tally.approval_percent() {
        Some(percent) => Gauge::default()
            .gauge_style(Style::default().fg(Color::Green).bg(Color::Red))
            .ratio((percent / 100.0).clamp(0.0, 1.0))
            .label(format!("{:.1}% approval", percent)),
        None => Gauge::default()
            .gauge_style(Style::default().fg(Color::DarkGray))
            .ratio(0.0)
            .label("no votes yet"),
    };
    f.render_widget(gauge, parts[1]);
}

fn draw_summary(f: &mut Frame, state: &RenderState, area: Rect) {
    let table_area = centered_rect(50, 80, area);
    f.render_widget(render_votes_table(&state.votes), table_area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if let Some(notice) = &state.notice {
        format!(" {} ", notice)
    } else if state.is_loading {
        String::from(" Loading referenda... ")
    } else {
        match state.phase {
            SessionPhase::Voting => String::from(" ←/h:nay | →/l:aye | drag card to swipe | r:reload | ?:help | q:quit "),
            SessionPhase::Summary => String::from(" All done! | r:reload | ?:help | q:quit "),
        }
    };

    let bar = Paragraph::new(status)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 SWIPEVOTE - Keyboard & Mouse

 VOTING
   → / l / y / a      Aye on the top card
   ← / h / n / x      Nay on the top card
   Drag card          Swipe right for Aye, left for Nay

 SESSION
   r                  Reconnect and reload referenda

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Votes stay in this session only.

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

/// Move a card sideways while it is dragged, staying inside `bounds`
fn shifted(rect: Rect, offset: i32, bounds: Rect) -> Rect {
    let min_x = bounds.x as i32;
    let max_x = (bounds.x + bounds.width.saturating_sub(rect.width)) as i32;
    let x = (rect.x as i32 + offset).clamp(min_x, max_x.max(min_x));
    Rect { x: x as u16, ..rect }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
