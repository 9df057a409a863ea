//! TUI Rendering
//!
//! Translates the dashboard's session and view state into ratatui widgets.
//! Exactly one primary content region is drawn per wizard step.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use simdash_core::catalog::EXPERIMENTS;
use simdash_core::types::NotifyLevel;
use simdash_session::view::{ConversationPanel, PanelEntry};
use simdash_session::wizard::{nav_buttons, WizardStep};

use crate::app::UiContext;

/// Main draw routine.
pub fn draw_ui(f: &mut Frame, ctx: &UiContext) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // connectivity banner + step indicator
            Constraint::Min(5),    // primary content region
            Constraint::Length(4), // notifications
            Constraint::Length(1), // key help
        ])
        .split(f.size());

    draw_header(f, chunks[0], ctx);
    match ctx.session.step {
        WizardStep::SelectExperiment => draw_picker(f, chunks[1], ctx),
        WizardStep::ConfigureTemplate => {
            draw_lines(f, chunks[1], "Configure Template", ctx.template_lines)
        }
        WizardStep::ReviewSettings => draw_lines(f, chunks[1], "Review Settings", ctx.review_lines),
        WizardStep::RunningSimulation => draw_simulation(f, chunks[1], ctx),
        WizardStep::Report => draw_report(f, chunks[1], ctx),
    }
    draw_notifications(f, chunks[2], ctx);
    draw_help(f, chunks[3], ctx);
}

fn draw_header(f: &mut Frame, area: Rect, ctx: &UiContext) {
    let step = ctx.session.step;
    let header = Line::from(vec![
        Span::styled(
            format!("{} {}", ctx.view.banner.icon(), ctx.view.banner.label()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Step {}/5: {}", step.number(), step.title()),
            Style::default().fg(Color::Cyan),
        ),
    ]);
    f.render_widget(Paragraph::new(header), area);
}

fn draw_picker(f: &mut Frame, area: Rect, ctx: &UiContext) {
    let mut lines = Vec::new();
    for (i, info) in EXPERIMENTS.iter().enumerate() {
        let selected = ctx.session.selected_experiment.as_deref() == Some(info.key);
        let marker = if selected { "●" } else { " " };
        let style = if i == ctx.picker_index {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::styled(format!("{} {}", marker, info.name), style));
        if i == ctx.picker_index {
            lines.push(Line::styled(
                format!("    {}", info.flow.join(" → ")),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
    let widget = Paragraph::new(lines)
        .block(Block::default().title("Select Experiment").borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn draw_lines(f: &mut Frame, area: Rect, title: &str, lines: &[String]) {
    let text: Vec<Line> = lines.iter().map(|l| Line::raw(l.as_str())).collect();
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn draw_simulation(f: &mut Frame, area: Rect, ctx: &UiContext) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    // Agent grid with transient status labels.
    let agent_lines: Vec<Line> = ctx
        .session
        .agents
        .iter()
        .map(|a| Line::raw(format!("{} {} [{}] - {}", a.icon, a.name, a.role, a.status)))
        .collect();
    let agents = Paragraph::new(agent_lines)
        .block(Block::default().title("Agents").borders(Borders::ALL));
    f.render_widget(agents, columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(columns[1]);

    let stats = ctx.view.stats;
    f.render_widget(
        Paragraph::new(format!(
            "Messages: {}  Agents: {}  Trust: {}%  Goal: {}%",
            stats.message_count, stats.active_agents, stats.trust_level, stats.goal_progress
        )),
        right[0],
    );

    let panel = Paragraph::new(
        panel_lines(&ctx.view.conversation_panel)
            .into_iter()
            .map(Line::raw)
            .collect::<Vec<_>>(),
    )
    .wrap(Wrap { trim: false })
    .block(Block::default().title("Live Conversation").borders(Borders::ALL));
    f.render_widget(panel, right[1]);
}

fn draw_report(f: &mut Frame, area: Rect, ctx: &UiContext) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let report = &ctx.view.report;
    for (area, title, lines) in [
        (top[0], "Executive Summary", &report.summary),
        (top[1], "Key Takeaways", &report.takeaways),
        (bottom[0], "Critical Moments", &report.critical_moments),
        (bottom[1], "Recommendations", &report.recommendations),
    ] {
        let widget = Paragraph::new(lines.iter().map(|l| Line::raw(l.as_str())).collect::<Vec<_>>())
            .wrap(Wrap { trim: false })
            .block(Block::default().title(title).borders(Borders::ALL));
        f.render_widget(widget, area);
    }
}

fn draw_notifications(f: &mut Frame, area: Rect, ctx: &UiContext) {
    let lines: Vec<Line> = ctx
        .view
        .notifications
        .iter()
        .rev()
        .take(3)
        .map(|n| {
            let color = match n.level {
                NotifyLevel::Success => Color::Green,
                NotifyLevel::Warning => Color::Yellow,
                NotifyLevel::Error => Color::Red,
                NotifyLevel::Info => Color::Blue,
            };
            Line::styled(n.text.clone(), Style::default().fg(color))
        })
        .collect();
    let widget =
        Paragraph::new(lines).block(Block::default().title("Notifications").borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn draw_help(f: &mut Frame, area: Rect, ctx: &UiContext) {
    let buttons = nav_buttons(ctx.session.step);
    let mut keys: Vec<&str> = Vec::new();
    if buttons.back {
        keys.push("b:back");
    }
    if buttons.next {
        keys.push("n:next");
    }
    if buttons.start {
        keys.push("s:start");
    }
    if buttons.stop {
        keys.push("x:stop");
    }
    match ctx.session.step {
        WizardStep::SelectExperiment => keys.push("↑/↓ + enter:select"),
        WizardStep::ConfigureTemplate => keys.push("c:check changes  d:reset"),
        WizardStep::RunningSimulation => keys.push("g:report  r:retry"),
        WizardStep::Report => keys.push("w:new simulation"),
        _ => {}
    }
    keys.push("q:quit");
    f.render_widget(
        Paragraph::new(keys.join("  ")).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

/// Flatten the conversation panel into display lines.
pub fn panel_lines(panel: &ConversationPanel) -> Vec<String> {
    match panel {
        ConversationPanel::Waiting => {
            vec!["Waiting for agents to start conversing...".to_string()]
        }
        ConversationPanel::Error { message } => vec![
            "⚠️ Connection Error".to_string(),
            format!("Unable to fetch live conversations: {}", message),
            "Press 'r' to try again".to_string(),
        ],
        ConversationPanel::Entries(entries) => {
            let mut lines = Vec::new();
            for entry in entries {
                match entry {
                    PanelEntry::DayHeader { day, conversation_count } => {
                        lines.push(format!("📅 Day {} ({} conversations)", day, conversation_count));
                    }
                    PanelEntry::Exchange {
                        agent_1,
                        agent_1_icon,
                        agent_2,
                        agent_2_icon,
                        sequence_no,
                        text,
                        ..
                    } => {
                        lines.push(format!(
                            "{} {} ↔ {} {}  #{}",
                            agent_1_icon, agent_1, agent_2_icon, agent_2, sequence_no
                        ));
                        lines.push(format!("   {}", text));
                    }
                    PanelEntry::Chat { agent_name, icon, time, content, tactic, .. } => {
                        lines.push(format!("[{}] {} {}: {}", time, icon, agent_name, content));
                        if let Some(tactic) = tactic {
                            lines.push(format!("   🎯 {}", tactic));
                        }
                    }
                }
            }
            lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_lines_waiting_and_error() {
        assert_eq!(panel_lines(&ConversationPanel::Waiting).len(), 1);
        let error = ConversationPanel::Error { message: "timeout".into() };
        let lines = panel_lines(&error);
        assert!(lines[1].contains("timeout"));
        assert!(lines[2].contains("'r'"));
    }

    #[test]
    fn test_panel_lines_render_tactic_tags() {
        let entries = ConversationPanel::Entries(vec![PanelEntry::Chat {
            agent_name: "SocialEngineer".into(),
            icon: "🕵️".into(),
            color: "#ef4444".into(),
            time: "10:00:00".into(),
            content: "I have an urgent report!".into(),
            tactic: Some("Creating Urgency".into()),
        }]);
        let lines = panel_lines(&entries);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("Creating Urgency"));
    }
}
