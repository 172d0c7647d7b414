use ratatui::prelude::*;
use ratatui::widgets::*;

const BANNER: &str = r#"
 ╔════════════════════════════════════════════════════════════╗
 ║  ██████╗ ██╗   ██╗ ██████╗  ██████╗ █████╗ ██████╗ ███████╗ ║
 ║  ██╔══██╗██║   ██║██╔═══██╗██╔════╝██╔══██╗██╔══██╗██╔════╝ ║
 ║  ██║  ██║██║   ██║██║   ██║██║     ███████║██║  ██║█████╗   ║
 ║  ██║  ██║██║   ██║██║   ██║██║     ██╔══██║██║  ██║██╔══╝   ║
 ║  ██████╔╝╚██████╔╝╚██████╔╝╚██████╗██║  ██║██████╔╝███████╗ ║
 ║  ╚═════╝  ╚═════╝  ╚═════╝  ╚═════╝╚═╝  ╚═╝╚═════╝ ╚══════╝ ║
 ╚════════════════════════════════════════════════════════════╝"#;

struct GameTile {
    key: &'static str,
    icon: &'static str,
    name: &'static str,
    desc: &'static str,
    color: Color,
    border_color: Color,
}

const GAME_TILES: [GameTile; 2] = [
    GameTile { key: "1", icon: "🟠", name: "Platformer", desc: "Stomp three enemies\nacross the ledges!", color: Color::Rgb(255, 170, 60), border_color: Color::Rgb(140, 90, 30) },
    GameTile { key: "2", icon: "🐤", name: "Flappy", desc: "Flap through the\ngaps in the pipes!", color: Color::Rgb(255, 220, 80), border_color: Color::Rgb(140, 120, 40) },
];

/// Best scores of the current session, one per tile.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionBests {
    pub platformer: u32,
    pub flappy: u32,
}

impl SessionBests {
    fn get(&self, idx: usize) -> u32 {
        match idx {
            0 => self.platformer,
            _ => self.flappy,
        }
    }
}

fn render_game_tile(frame: &mut Frame, area: Rect, tile: &GameTile, selected: bool) {
    let border_color = if selected { Color::Rgb(255, 220, 80) } else { tile.border_color };
    let border_type = if selected { BorderType::Double } else { BorderType::Rounded };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 { return; }

    let mut lines: Vec<Line> = Vec::new();

    let name_color = if selected { Color::Rgb(255, 255, 255) } else { tile.color };
    lines.push(Line::from(vec![
        Span::styled(format!("[{}] ", tile.key), Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(format!("{} ", tile.icon), Style::default()),
        Span::styled(tile.name, Style::default().fg(name_color).add_modifier(Modifier::BOLD)),
    ]));

    for desc_line in tile.desc.split('\n') {
        lines.push(Line::from(vec![
            Span::styled(desc_line, Style::default().fg(if selected { Color::Rgb(180, 180, 200) } else { Color::Rgb(120, 120, 140) })),
        ]));
    }

    if selected {
        lines.push(Line::from(vec![
            Span::styled("▶ Enter to play", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        ]));
    }

    let p = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(p, inner);
}

fn key_line(keys: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("    {:<17}", keys), Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(action, Style::default().fg(Color::Rgb(140, 140, 140))),
    ])
}

fn game_controls(game_idx: usize) -> Vec<Line<'static>> {
    let tile = &GAME_TILES[game_idx.min(GAME_TILES.len() - 1)];
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {} {}", tile.icon, tile.name), Style::default().fg(tile.color).add_modifier(Modifier::BOLD)),
        ]),
    ];
    match game_idx {
        0 => {
            lines.push(Line::from(vec![
                Span::styled("  Land on enemies to defeat them. Touching them hurts.", Style::default().fg(Color::Rgb(100, 100, 120))),
            ]));
            lines.push(Line::from(""));
            lines.push(key_line("← → / A D", "Run"));
            lines.push(key_line("↑ / W / Space", "Jump"));
        }
        _ => {
            lines.push(Line::from(vec![
                Span::styled("  Each pipe you clear is a point.", Style::default().fg(Color::Rgb(100, 100, 120))),
            ]));
            lines.push(Line::from(""));
            lines.push(key_line("Space / ↑ / Enter", "Flap, start, retry"));
        }
    }
    lines.push(key_line("R", "Restart"));
    lines.push(key_line("P", "Pause"));
    lines
}

pub fn render_home(frame: &mut Frame, area: Rect, selected_game: usize, show_bests: bool, bests: SessionBests) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Banner
            Constraint::Length(2),  // Subtitle
            Constraint::Length(8),  // Game tiles
            Constraint::Min(10),    // Controls area
            Constraint::Length(2),  // Footer
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(80, 200, 255)))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let subtitle = Paragraph::new(Line::from(vec![
        Span::styled(
            "  ⚡ Two Games, One Terminal ⚡  ",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    let games_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🎮 Games: ←→ Select, Enter to Play ")
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD));
    let games_inner = games_block.inner(chunks[2]);
    frame.render_widget(games_block, chunks[2]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(games_inner);
    for (i, tile) in GAME_TILES.iter().enumerate() {
        render_game_tile(frame, cols[i], tile, selected_game == i);
    }

    let ctrl_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(60),
        ])
        .split(chunks[3]);

    let controls = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  🔧 Navigation", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        ]),
        key_line("Tab / Shift+Tab", "Switch tabs"),
        key_line("1-2", "Launch game"),
        key_line("← →", "Select game"),
        key_line("Enter", "Play selected"),
        key_line("Esc", "Return to Home"),
        key_line("M", "Mute / unmute"),
        key_line("q / Ctrl+C", "Quit"),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
            .title(" ⌨ Navigation Control ")
            .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(controls, ctrl_cols[0]);

    let tile = &GAME_TILES[selected_game.min(GAME_TILES.len() - 1)];
    let game_ctrl = Paragraph::new(game_controls(selected_game))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Rgb(50, 100, 140)))
                .title(format!(" 🎮 {} Control ", tile.name))
                .title_style(Style::default().fg(tile.color).add_modifier(Modifier::BOLD)),
        );
    frame.render_widget(game_ctrl, ctrl_cols[1]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("  🦀 ", Style::default().fg(Color::Rgb(255, 100, 50))),
        Span::styled(concat!("v", env!("CARGO_PKG_VERSION")), Style::default().fg(Color::Rgb(80, 80, 100))),
        Span::styled("  │  ", Style::default().fg(Color::Rgb(40, 40, 60))),
        Span::styled("H", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(" Session Bests", Style::default().fg(Color::Rgb(100, 100, 130))),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[4]);

    if show_bests {
        render_bests_overlay(frame, area, bests);
    }
}

fn render_bests_overlay(frame: &mut Frame, area: Rect, bests: SessionBests) {
    let overlay_w = 40u16.min(area.width.saturating_sub(4));
    let overlay_h = 11u16.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 200, 80)))
        .title(" 🏆 Session Bests ")
        .title_style(Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let mut lines: Vec<Line> = vec![Line::from("")];
    for (idx, tile) in GAME_TILES.iter().enumerate() {
        let best = bests.get(idx);
        let score = if best > 0 {
            Span::styled(format!("{}", best), Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD))
        } else {
            Span::styled("No scores yet", Style::default().fg(Color::Rgb(60, 60, 80)))
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", tile.icon), Style::default()),
            Span::styled(format!("{:<12}", tile.name), Style::default().fg(tile.color).add_modifier(Modifier::BOLD)),
            score,
        ]));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![
        Span::styled("  Press ", Style::default().fg(Color::Rgb(80, 80, 100))),
        Span::styled("H", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(" to close", Style::default().fg(Color::Rgb(80, 80, 100))),
    ]));

    let p = Paragraph::new(lines).style(Style::default().bg(Color::Rgb(15, 15, 25)));
    frame.render_widget(p, inner);
}
