use ratatui::{
    prelude::*,
    layout::Flex,
    widgets::{Block, Borders, Cell, Clear, HighlightSpacing, Paragraph, Row, Table, TableState},
};

use crate::app::App;
use crate::controller::ViewState;
use crate::detail::DetailPanel;
use crate::models::{DetailControl, RowControl, User};
use crate::theme::Theme;
use crate::utils::{centered_rect, contains};

pub const LOADING_MESSAGE: &str = "Loading users...";

const HEADERS: [&str; 6] = ["Name / Email", "Address", "Phone", "Website", "Company", "Action"];
const COLUMN_WIDTHS: [Constraint; 6] = [
    Constraint::Fill(3),
    Constraint::Fill(4),
    Constraint::Length(22),
    Constraint::Fill(2),
    Constraint::Fill(2),
    Constraint::Length(6),
];
const COLUMN_SPACING: u16 = 1;
const WEBSITE_COLUMN: usize = 3;
const ACTION_COLUMN: usize = 5;
const HEADER_HEIGHT: u16 = 1;
const ROW_HEIGHT: u16 = 2;

const CLOSE_LABEL: &str = "[ Close ]";
const MAP_LABEL: &str = "[ View on map ]";

/// Screen regions of one rendered table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRegion {
    pub index: usize,
    pub area: Rect,
    pub website: Rect,
    pub delete: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRegions {
    pub area: Rect,
    pub controls: Vec<(DetailControl, Rect)>,
}

impl PanelRegions {
    pub fn new(area: Rect) -> Self {
        Self { area, controls: Vec::new() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelHit {
    Outside,
    Inside,
    Control(DetailControl),
}

/// Where things were drawn in the last frame, for pointer hit-testing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    pub rows: Vec<RowRegion>,
    pub panel: Option<PanelRegions>,
}

impl HitMap {
    pub fn row_at(&self, column: u16, row: u16) -> Option<(usize, RowControl)> {
        let region = self.rows.iter().find(|r| contains(r.area, column, row))?;
        let control = if contains(region.delete, column, row) {
            RowControl::Delete
        } else if contains(region.website, column, row) {
            RowControl::Website
        } else {
            RowControl::Row
        };
        Some((region.index, control))
    }

    pub fn panel_at(&self, column: u16, row: u16) -> PanelHit {
        // Not drawn yet: swallow the click rather than treat it as a backdrop press.
        let Some(panel) = &self.panel else {
            return PanelHit::Inside;
        };
        if !contains(panel.area, column, row) {
            return PanelHit::Outside;
        }
        panel
            .controls
            .iter()
            .find(|(_, rect)| contains(*rect, column, row))
            .map_or(PanelHit::Inside, |(control, _)| PanelHit::Control(*control))
    }
}

/// Renders the whole screen and records the hit map for the next input.
pub fn render(f: &mut Frame, app: &mut App) {
    let theme = Theme::default();
    app.hits = HitMap::default();
    let area = f.area();

    if !app.is_loaded() {
        let (text, style) = match app.controller.state() {
            ViewState::Errored(message) => (message.as_str(), theme.error),
            _ => (LOADING_MESSAGE, theme.loading),
        };
        render_message(f, area, text, style);
        return;
    }

    let [body, footer] = Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(area);
    app.hits.rows = render_table(f, body, app, &theme);
    render_footer(f, footer, app, &theme);

    if let Some(panel) = &app.detail {
        app.hits.panel = Some(render_detail(f, panel, &theme));
    }
}

fn render_message(f: &mut Frame, area: Rect, text: &str, style: Style) {
    let [_, line, _] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1), Constraint::Fill(1)]).areas(area);
    f.render_widget(Paragraph::new(text.to_string()).style(style).alignment(Alignment::Center), line);
}

fn column_areas(inner: Rect) -> std::rc::Rc<[Rect]> {
    Layout::horizontal(COLUMN_WIDTHS)
        .flex(Flex::Start)
        .spacing(COLUMN_SPACING)
        .split(Rect::new(inner.x, inner.y, inner.width, 1))
}

fn user_row(user: &User, focused: Option<RowControl>, theme: &Theme) -> Row<'static> {
    let control_style = |control: RowControl, base: Style| {
        if focused == Some(control) { theme.focused_control } else { base }
    };
    let name_email = Text::from(vec![
        Line::styled(user.name.clone(), theme.name),
        Line::styled(user.email.clone(), theme.email),
    ]);
    Row::new(vec![
        Cell::from(name_email),
        Cell::from(user.flat_address()),
        Cell::from(user.phone.clone()),
        Cell::from(Span::styled(user.website.clone(), control_style(RowControl::Website, theme.link))),
        Cell::from(user.company.name.clone()),
        Cell::from(Span::styled(" ✕ ", control_style(RowControl::Delete, theme.delete))),
    ])
    .height(ROW_HEIGHT)
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App, theme: &Theme) -> Vec<RowRegion> {
    let block = Block::default()
        .title(format!("Users ({})", app.users().len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    let visible = (inner.height.saturating_sub(HEADER_HEIGHT) / ROW_HEIGHT) as usize;
    app.cursor.ensure_visible(visible);

    let users = app.users();
    let cursor = &app.cursor;
    let rows: Vec<Row> = users
        .iter()
        .enumerate()
        .map(|(i, user)| user_row(user, (i == cursor.selected).then_some(cursor.control), theme))
        .collect();
    let selected = (!users.is_empty()).then_some(cursor.selected);

    let table = Table::new(rows, COLUMN_WIDTHS)
        .header(Row::new(HEADERS).style(theme.header).height(HEADER_HEIGHT))
        .block(block)
        .column_spacing(COLUMN_SPACING)
        .flex(Flex::Start)
        .highlight_style(theme.selection)
        .highlight_spacing(HighlightSpacing::Never);
    let mut state = TableState::default().with_offset(cursor.offset).with_selected(selected);
    f.render_stateful_widget(table, area, &mut state);

    let columns = column_areas(inner);
    let first_row_y = inner.y + HEADER_HEIGHT;
    (cursor.offset..users.len())
        .take(visible)
        .enumerate()
        .map(|(slot, index)| {
            let y = first_row_y + slot as u16 * ROW_HEIGHT;
            let cell = |c: usize| Rect::new(columns[c].x, y, columns[c].width, ROW_HEIGHT);
            RowRegion {
                index,
                area: Rect::new(inner.x, y, inner.width, ROW_HEIGHT),
                website: cell(WEBSITE_COLUMN),
                delete: cell(ACTION_COLUMN),
            }
        })
        .collect()
}

fn render_footer(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let help = if app.detail.is_some() {
        "Esc Close | Tab Next control | Enter/Space Activate | m Map | c Copy email | Ctrl-C Quit"
    } else {
        "↑/↓ or j/k Move | Tab Row control | Enter/Space Open | d Delete | PgUp/PgDn Scroll | q Quit"
    };
    let title = app.status.clone().or_else(|| app.focus_label()).unwrap_or_default();
    let footer = Paragraph::new(help)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(theme.footer);
    f.render_widget(footer, area);
}

fn render_detail(f: &mut Frame, panel: &DetailPanel, theme: &Theme) -> PanelRegions {
    let user = panel.user();
    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(user.name.clone(), theme.popup_title))
        .borders(Borders::ALL)
        .style(theme.popup_border);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let focused = |control: DetailControl, base: Style| {
        if panel.control() == control { theme.focused_control } else { base }
    };
    let field = |label: &'static str, value: Span<'static>| {
        Line::from(vec![Span::styled(format!("{label}: "), theme.label), value])
    };
    let [street_line, city_line] = panel.address_lines();

    let email_line = 0;
    let map_line = 5;
    let website_line = 9;
    let lines = vec![
        Line::from(Span::styled(user.email.clone(), focused(DetailControl::Email, theme.link))),
        Line::default(),
        Line::styled("Address", theme.section_title),
        Line::styled(street_line, theme.popup_text),
        Line::styled(city_line, theme.popup_text),
        Line::from(Span::styled(MAP_LABEL, focused(DetailControl::Map, theme.button))),
        Line::default(),
        Line::styled("Contact", theme.section_title),
        field("Phone", Span::styled(user.phone.clone(), theme.popup_text)),
        field("Website", Span::styled(user.website.clone(), focused(DetailControl::Website, theme.link))),
        Line::default(),
        Line::styled("Company", theme.section_title),
        field("Name", Span::styled(user.company.name.clone(), theme.popup_text)),
        field("Catchphrase", Span::styled(user.company.catch_phrase.clone(), theme.popup_text)),
        field("Business", Span::styled(user.company.bs.clone(), theme.popup_text)),
    ];
    let widths: Vec<u16> = lines.iter().map(|l| l.width() as u16).collect();
    f.render_widget(Paragraph::new(lines), inner);

    let mut regions = PanelRegions::new(area);
    let close_width = CLOSE_LABEL.len() as u16;
    if area.width > close_width + 2 {
        let close = Rect::new(area.right() - close_width - 2, area.y, close_width, 1);
        f.render_widget(Paragraph::new(CLOSE_LABEL).style(focused(DetailControl::Close, theme.button)), close);
        regions.controls.push((DetailControl::Close, close));
    }
    for (control, line) in [(DetailControl::Email, email_line), (DetailControl::Map, map_line), (DetailControl::Website, website_line)] {
        let rect = Rect::new(inner.x, inner.y + line, widths[line as usize].min(inner.width), 1);
        if line < inner.height {
            regions.controls.push((control, rect));
        }
    }
    regions
}
