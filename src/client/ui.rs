use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::client::app::App;
use crate::client::focus::{Focus, Row};
use crate::client::hit_map::HitMap;
use crate::client::selection::{Gesture, SelectionState};
use crate::client::session::Session;
use crate::config::ClientConfig;
use crate::snapshot::{Card, GameSnapshot, Minion, PlayerSnapshot};

const MINION_WIDTH: u16 = 16;
const MIN_MINION_WIDTH: u16 = 10;
const CARD_WIDTH: u16 = 18;
const MIN_CARD_WIDTH: u16 = 11;
const END_TURN_WIDTH: u16 = 14;

pub fn render(app: &mut App, f: &mut Frame) {
    draw(f, &app.session, &app.focus, &mut app.hit_map, &app.config);
}

/// Draws one frame and rebuilds the click regions to match it.
pub fn draw(f: &mut Frame, session: &Session, focus: &Focus, hits: &mut HitMap, config: &ClientConfig) {
    hits.reset(session.generation());
    let log_height = config.ui.log_panel_height;

    let Some(snapshot) = session.snapshot() else {
        let [body, log, footer] = split3(f.size(), log_height);
        draw_waiting(f, body, &config.server_url);
        draw_log(f, log, session);
        draw_footer(f, footer, false);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(log_height),
            Constraint::Length(1),
        ])
        .split(f.size());

    let selection = session.selection();
    let board = Board {
        selection,
        focus,
        waiting: !session.is_interactive(),
    };

    draw_header(f, rows[0], snapshot, &board, hits);
    draw_hero(f, rows[1], snapshot.opposing_player(), false);
    draw_opponent_field(f, rows[2], &snapshot.opposing_player().field, &board, hits);
    draw_own_field(f, rows[3], &snapshot.acting_player().field, &board, hits);
    draw_hero(f, rows[4], snapshot.acting_player(), true);
    draw_hand(f, rows[5], &snapshot.acting_player().hand, &board, hits);
    draw_log(f, rows[6], session);
    draw_footer(f, rows[7], true);
}

/// Per-frame presentation inputs shared by the board rows.
struct Board<'a> {
    selection: SelectionState,
    focus: &'a Focus,
    waiting: bool,
}

fn split3(area: Rect, log_height: u16) -> [Rect; 3] {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(log_height),
            Constraint::Length(1),
        ])
        .split(area);
    [rows[0], rows[1], rows[2]]
}

impl Board<'_> {
    /// The item of `row` that must stay on screen when the row scrolls.
    fn keep(&self, row: Row) -> usize {
        if self.focus.row == row {
            self.focus.index
        } else {
            0
        }
    }
}

/// Lays out `count` slots left to right inside `area`, paired with their
/// item index. Slots narrow from `width` down to `min_width` to fit; a row
/// that still overflows shows the window of slots containing `keep`.
fn slots(area: Rect, count: usize, width: u16, min_width: u16, keep: usize) -> Vec<(usize, Rect)> {
    if count == 0 || area.width == 0 || area.height == 0 {
        return Vec::new();
    }
    let fair = u16::try_from(usize::from(area.width) / count).unwrap_or(u16::MAX);
    let width = fair.clamp(min_width, width).min(area.width);
    let visible = usize::from(area.width / width).min(count);
    let first = keep.min(count - 1).saturating_sub(visible - 1);

    (first..first + visible)
        .zip(0u16..)
        .map(|(index, column)| {
            let x = area.x.saturating_add(column.saturating_mul(width));
            (index, Rect::new(x, area.y, width, area.height))
        })
        .collect()
}

/// Row title, with the visible range when some items are scrolled away.
fn row_title(name: &str, shown: &[(usize, Rect)], count: usize) -> String {
    match (shown.first(), shown.last()) {
        (Some(&(first, _)), Some(&(last, _))) if shown.len() < count => {
            format!("{name} {}-{} of {count}", first + 1, last + 1)
        }
        _ => name.to_string(),
    }
}

fn titled(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
}

fn draw_waiting(f: &mut Frame, area: Rect, server_url: &str) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No game state",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Waiting for the game server at {server_url}")),
        Line::from("Press `r` to retry or `q` to quit."),
    ];
    f.render_widget(
        Paragraph::new(text)
            .block(titled("OpenHS").title_alignment(Alignment::Center))
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_header(f: &mut Frame, area: Rect, snapshot: &GameSnapshot, board: &Board, hits: &mut HitMap) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(END_TURN_WIDTH)])
        .split(area);

    let mut line = vec![
        Span::styled(
            format!("Turn {}", snapshot.current_turn),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  Phase: {}", snapshot.phase)),
        Span::raw(format!("  {} to act", snapshot.acting_player().hero.name)),
    ];
    if board.waiting {
        line.push(Span::styled(
            "  waiting for server...",
            Style::default().fg(Color::Yellow),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(line)).block(titled("OpenHS")), cols[0]);

    // the server decides; a missing endTurn only dims the button
    let button_style = if board.waiting || !snapshot.offers("endTurn") {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };
    f.render_widget(
        Paragraph::new("End Turn")
            .alignment(Alignment::Center)
            .style(button_style)
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Thick)),
        cols[1],
    );
    hits.register(cols[1], Gesture::EndTurn);
}

fn draw_hero(f: &mut Frame, area: Rect, player: &PlayerSnapshot, own: bool) {
    let mut line = vec![
        Span::styled(
            format!("♛ {}", player.hero.name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} HP", player.hero.health),
            Style::default().fg(Color::Red),
        ),
        Span::styled(
            format!("  Mana {}/{}", player.mana, player.total_mana),
            Style::default().fg(Color::Blue),
        ),
    ];
    if let Some(weapon) = &player.weapon {
        line.push(Span::raw(format!(
            "  ⚔ {} {}/{}",
            weapon.name, weapon.attack, weapon.health
        )));
    }
    if !own {
        // opponents only reveal card backs
        line.push(Span::raw(format!("  Hand: {}", "? ".repeat(player.hand.len()))));
    }
    let title = if own { "You" } else { "Opponent" };
    f.render_widget(Paragraph::new(Line::from(line)).block(titled(title)), area);
}

fn minion_lines(minion: &Minion, show_ready: bool) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(Span::styled(
            minion.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{} ⚔  {} ♥", minion.attack, minion.health)),
    ];
    if !minion.tags.is_empty() {
        lines.push(Line::from(Span::styled(
            minion.tags.join(", "),
            Style::default().fg(Color::Magenta),
        )));
    }
    if show_ready && minion.can_attack {
        lines.push(Line::from(Span::styled("ready", Style::default().fg(Color::Green))));
    }
    lines
}

fn slot_block(focused: bool, style: Style) -> Block<'static> {
    let border_type = if focused {
        BorderType::Double
    } else {
        BorderType::Rounded
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(style)
}

fn draw_opponent_field(f: &mut Frame, area: Rect, field: &[Minion], board: &Board, hits: &mut HitMap) {
    let inner = titled("").inner(area);
    let shown = slots(
        inner,
        field.len(),
        MINION_WIDTH,
        MIN_MINION_WIDTH,
        board.keep(Row::OpponentField),
    );
    let title = row_title("Opponent board", &shown, field.len());
    f.render_widget(titled(&title), area);

    let targeting = matches!(board.selection, SelectionState::Attacking(_));
    for (index, slot) in shown {
        let minion = &field[index];
        let style = if targeting {
            Style::default().fg(Color::LightRed)
        } else {
            Style::default()
        };
        let focused = board.focus.is_on(Row::OpponentField, index);
        f.render_widget(
            Paragraph::new(minion_lines(minion, false)).block(slot_block(focused, style)),
            slot,
        );
        hits.register(slot, Gesture::OpponentMinion(index));
    }
}

fn draw_own_field(f: &mut Frame, area: Rect, field: &[Minion], board: &Board, hits: &mut HitMap) {
    let placing = matches!(board.selection, SelectionState::CardSelected(_));
    let count = field.len() + usize::from(placing);
    let inner = titled("").inner(area);
    let shown = slots(inner, count, MINION_WIDTH, MIN_MINION_WIDTH, board.keep(Row::OwnField));
    let title = row_title("Your board", &shown, count);
    f.render_widget(titled(&title), area);

    for (index, slot) in shown {
        let focused = board.focus.is_on(Row::OwnField, index);
        match field.get(index) {
            Some(minion) => {
                let style = if board.selection == SelectionState::Attacking(index) {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else if minion.can_attack {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                f.render_widget(
                    Paragraph::new(minion_lines(minion, true)).block(slot_block(focused, style)),
                    slot,
                );
            }
            None => {
                f.render_widget(
                    Paragraph::new("\n  +  ")
                        .alignment(Alignment::Center)
                        .block(slot_block(focused, Style::default().fg(Color::Yellow))),
                    slot,
                );
            }
        }
        hits.register(slot, Gesture::OwnField(index));
    }
}

fn card_lines(card: &Card) -> Vec<Line<'_>> {
    let mut lines = vec![Line::from(Span::styled(
        card.name.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some((attack, health)) = card.stats() {
        lines.push(Line::from(format!("{attack} ⚔  {health} ♥")));
    }
    if let Some(description) = card.description() {
        lines.push(Line::from(Span::styled(
            description,
            Style::default().fg(Color::Gray),
        )));
    }
    lines
}

fn draw_hand(f: &mut Frame, area: Rect, hand: &[Card], board: &Board, hits: &mut HitMap) {
    let inner = titled("").inner(area);
    let shown = slots(inner, hand.len(), CARD_WIDTH, MIN_CARD_WIDTH, board.keep(Row::Hand));
    let title = row_title("Your hand", &shown, hand.len());
    f.render_widget(titled(&title), area);

    let attacking = matches!(board.selection, SelectionState::Attacking(_));
    for (index, slot) in shown {
        let card = &hand[index];
        let style = if board.selection == SelectionState::CardSelected(index) {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else if attacking {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        let focused = board.focus.is_on(Row::Hand, index);
        let block = slot_block(focused, style).title(format!(
            " {} {} ",
            card.card_type.icon(),
            card.cost
        ));
        f.render_widget(
            Paragraph::new(card_lines(card))
                .wrap(Wrap { trim: true })
                .block(block),
            slot,
        );
        hits.register(slot, Gesture::HandCard(index));
    }
}

fn draw_log(f: &mut Frame, area: Rect, session: &Session) {
    let visible = usize::from(area.height.saturating_sub(2));
    let lines: Vec<Line> = session
        .log()
        .tail(visible)
        .iter()
        .map(|entry| Line::from(entry.as_str()))
        .collect();
    f.render_widget(Paragraph::new(lines).block(titled("Game log")), area);
}

fn draw_footer(f: &mut Frame, area: Rect, playing: bool) {
    let help = if playing {
        "click or arrows + Enter: select  e: end turn  r: refresh  q: quit"
    } else {
        "r: retry  q: quit"
    };
    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
