use std::error::Error;
use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame, Terminal,
};

use super::app::{App, InputMode, Screen};

/// Entry point for the TUI. Called from main.rs.
pub fn run_tui(mut app: App) -> Result<(), Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                handle_key_event(&mut app, key);
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// Dispatch keyboard events depending on input mode.
fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_key_normal(app, key),
        InputMode::AddingSale | InputMode::AddingCredit => handle_key_form(app, key),
    }
}

/// Key handling in normal mode.
fn handle_key_normal(app: &mut App, key: KeyEvent) {
    use KeyCode::*;

    match key.code {
        // Quit
        Char('q') => app.should_quit = true,

        // Screen switch
        Tab => app.next_screen(),
        BackTab => app.prev_screen(),

        // Move selection in the current ledger
        Up => app.selection_up(),
        Down => app.selection_down(),

        // Open the entry form for the current ledger
        Char('a') => app.open_form(),

        // Delete the selected record
        Char('d') => app.delete_selected(),

        // Help screen
        Char('?') => {
            app.current_screen = Screen::Help;
        }

        _ => {}
    }
}

/// Key handling while one of the entry forms is open.
fn handle_key_form(app: &mut App, key: KeyEvent) {
    use KeyCode::*;

    match key.code {
        Esc => app.cancel_form(),

        Enter => app.submit_form(),

        Tab | Down => app.focus_next(),
        BackTab | Up => app.focus_prev(),

        Backspace => app.pop_char(),

        Char(c) => app.push_char(c),

        _ => {}
    }
}

/// Top-level UI layout: header, main content, footer.
fn ui(f: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(0),    // main
            Constraint::Length(3), // footer
        ])
        .split(f.area());

    // Header
    let screen_name = match app.current_screen {
        Screen::Sales => "Sell Products",
        Screen::Credits => "Udhar",
        Screen::Help => "Help",
    };
    let header_text = format!(
        "Khata - {screen_name}   |   {} sales, {} udhar entries",
        app.sales.len(),
        app.credits.len()
    );
    let header = Paragraph::new(header_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    // Main content
    match app.current_screen {
        Screen::Sales => draw_sales(f, chunks[1], app),
        Screen::Credits => draw_credits(f, chunks[1], app),
        Screen::Help => draw_help(f, chunks[1]),
    }

    // Footer: save failures take priority over key hints
    let footer_text = if let Some(err) = &app.save_error {
        format!("SAVE FAILED: {err}")
    } else {
        match app.input_mode {
            InputMode::Normal => {
                "Tab: switch ledger  |  ↑/↓: move  |  a: add  |  d: delete  |  ?: help  |  q: quit"
                    .to_string()
            }
            InputMode::AddingSale | InputMode::AddingCredit => {
                "Type to edit  |  Tab/↑/↓: field  |  Enter: save  |  Esc: cancel".to_string()
            }
        }
    };
    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[2]);
}

/// Split the main area when a form is open: form on top, ledger below.
fn split_for_form(area: Rect, field_count: usize) -> (Option<Rect>, Rect) {
    let form_height = field_count as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(form_height), Constraint::Min(0)])
        .split(area);
    (Some(chunks[0]), chunks[1])
}

fn field_line(label: &str, value: &str, focused: bool) -> String {
    let marker = if focused { ">" } else { " " };
    let cursor = if focused { "_" } else { "" };
    format!("{marker} {label:<14} {value}{cursor}")
}

// Sales screen: entry form (when open), record table, totals line.
fn draw_sales(f: &mut Frame<'_>, area: Rect, app: &App) {
    let (form_area, rest) = if app.input_mode == InputMode::AddingSale {
        split_for_form(area, super::app::SALE_FIELD_COUNT)
    } else {
        (None, area)
    };

    if let Some(form_area) = form_area {
        let form = &app.sale_form;
        let text = [
            field_line("Product name", &form.name, app.form_focus == 0),
            field_line("Quantity", &form.quantity, app.form_focus == 1),
            field_line("Buy rate", &form.buy_rate, app.form_focus == 2),
            field_line("Sell rate", &form.sell_rate, app.form_focus == 3),
        ]
        .join("\n");
        let p = Paragraph::new(text).block(
            Block::default()
                .title("Add Sell Product")
                .borders(Borders::ALL),
        );
        f.render_widget(p, form_area);
    }

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(rest);

    let records = app.sales.records();
    let mut selected_idx = app.selected_sale_idx;
    if !records.is_empty() && selected_idx >= records.len() {
        selected_idx = records.len() - 1;
    }

    let rows = records.iter().enumerate().map(|(idx, r)| {
        let date = r.date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
        let cells = vec![
            (idx + 1).to_string(),
            r.name.clone(),
            format!("{}", r.quantity),
            format!("{:.2}", r.buy_rate),
            format!("{:.2}", r.sell_rate),
            format!("{:.2}", r.investment),
            format!("{:.2}", r.sale_value),
            format!("{:.2}", r.profit),
            date,
        ];

        let mut row = Row::new(cells);
        if idx == selected_idx {
            row = row.style(Style::default().add_modifier(Modifier::REVERSED));
        }
        row
    });

    let widths = [
        Constraint::Length(4),
        Constraint::Length(18),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec![
                "#", "Product", "Qty", "Buy Rate", "Sell Rate", "Investment", "Sell", "Profit",
                "Date",
            ])
            .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .title("Sell Product List")
                .borders(Borders::ALL),
        );
    f.render_widget(table, body[0]);

    let totals = format!(
        "Total Investment: {:.2}   |   Total Sell: {:.2}   |   Total Profit: {:.2}",
        app.sales.total_investment(),
        app.sales.total_sale(),
        app.sales.total_profit()
    );
    let p = Paragraph::new(totals).block(
        Block::default()
            .title(Span::raw("Totals"))
            .borders(Borders::ALL),
    );
    f.render_widget(p, body[1]);
}

// Udhar screen: entry form (when open), record table, total line.
fn draw_credits(f: &mut Frame<'_>, area: Rect, app: &App) {
    let (form_area, rest) = if app.input_mode == InputMode::AddingCredit {
        split_for_form(area, super::app::CREDIT_FIELD_COUNT)
    } else {
        (None, area)
    };

    if let Some(form_area) = form_area {
        let form = &app.credit_form;
        let text = [
            field_line("Person's name", &form.person, app.form_focus == 0),
            field_line("Item given", &form.item, app.form_focus == 1),
            field_line("Amount", &form.amount, app.form_focus == 2),
        ]
        .join("\n");
        let p = Paragraph::new(text).block(
            Block::default()
                .title("Add Udhar Product")
                .borders(Borders::ALL),
        );
        f.render_widget(p, form_area);
    }

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(rest);

    let records = app.credits.records();
    let mut selected_idx = app.selected_credit_idx;
    if !records.is_empty() && selected_idx >= records.len() {
        selected_idx = records.len() - 1;
    }

    let rows = records.iter().enumerate().map(|(idx, r)| {
        let date = r.date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
        let cells = vec![
            (idx + 1).to_string(),
            r.person.clone(),
            r.item.clone(),
            format!("{:.2}", r.amount),
            date,
        ];

        let mut row = Row::new(cells);
        if idx == selected_idx {
            row = row.style(Style::default().add_modifier(Modifier::REVERSED));
        }
        row
    });

    let widths = [
        Constraint::Length(4),
        Constraint::Length(18),
        Constraint::Length(20),
        Constraint::Length(12),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Given To", "Item", "Amount", "Date"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .title("Udhar Product List")
                .borders(Borders::ALL),
        );
    f.render_widget(table, body[0]);

    let total = format!("Total Udhar: {:.2}", app.credits.total());
    let p = Paragraph::new(total).block(Block::default().borders(Borders::ALL));
    f.render_widget(p, body[1]);
}

fn draw_help(f: &mut Frame<'_>, area: Rect) {
    let text = "\
Khata keeps two books for the shop:

  Sell Products  - every sale with quantity, buy/sell rate and the
                   profit worked out at entry time.
  Udhar          - goods given on credit, by person and item.

Keys (normal mode):
  Tab / Shift+Tab   switch between the books
  Up / Down         move the selection
  a                 add a record to the current book
  d                 delete the selected record
  q                 quit

Keys (while adding):
  Tab / Up / Down   move between fields
  Enter             save the entry (invalid entries are ignored)
  Esc               discard the entry

Every change is written straight back to the snapshot files in the
data directory, so closing the program never loses a recorded entry.";

    let p = Paragraph::new(text).block(Block::default().title("Help").borders(Borders::ALL));
    f.render_widget(p, area);
}
