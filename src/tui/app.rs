use crate::books::{
    CreditForm, CreditLedger, SaleForm, SalesLedger, Storage, CREDITS_KEY, SALES_KEY,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Sales,
    Credits,
    Help,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    AddingSale,
    AddingCredit,
}

pub const SALE_FIELD_COUNT: usize = 4;
pub const CREDIT_FIELD_COUNT: usize = 3;

pub struct App {
    pub sales: SalesLedger,
    pub credits: CreditLedger,
    pub storage: Storage,
    pub current_screen: Screen,
    pub input_mode: InputMode,
    pub sale_form: SaleForm,
    pub credit_form: CreditForm,
    pub form_focus: usize,
    pub selected_sale_idx: usize,
    pub selected_credit_idx: usize,
    pub save_error: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(sales: SalesLedger, credits: CreditLedger, storage: Storage) -> Self {
        Self {
            sales,
            credits,
            storage,
            current_screen: Screen::Sales,
            input_mode: InputMode::Normal,
            sale_form: SaleForm::default(),
            credit_form: CreditForm::default(),
            form_focus: 0,
            selected_sale_idx: 0,
            selected_credit_idx: 0,
            save_error: None,
            should_quit: false,
        }
    }

    pub fn next_screen(&mut self) {
        self.current_screen = match self.current_screen {
            Screen::Sales => Screen::Credits,
            Screen::Credits => Screen::Help,
            Screen::Help => Screen::Sales,
        };
    }

    pub fn prev_screen(&mut self) {
        self.current_screen = match self.current_screen {
            Screen::Sales => Screen::Help,
            Screen::Credits => Screen::Sales,
            Screen::Help => Screen::Credits,
        };
    }

    pub fn selection_up(&mut self) {
        match self.current_screen {
            Screen::Sales => {
                if self.selected_sale_idx > 0 {
                    self.selected_sale_idx -= 1;
                }
            }
            Screen::Credits => {
                if self.selected_credit_idx > 0 {
                    self.selected_credit_idx -= 1;
                }
            }
            Screen::Help => {}
        }
    }

    pub fn selection_down(&mut self) {
        match self.current_screen {
            Screen::Sales => {
                if self.selected_sale_idx + 1 < self.sales.len() {
                    self.selected_sale_idx += 1;
                }
            }
            Screen::Credits => {
                if self.selected_credit_idx + 1 < self.credits.len() {
                    self.selected_credit_idx += 1;
                }
            }
            Screen::Help => {}
        }
    }

    /// `a` on a ledger screen opens the matching entry form.
    pub fn open_form(&mut self) {
        match self.current_screen {
            Screen::Sales => self.input_mode = InputMode::AddingSale,
            Screen::Credits => self.input_mode = InputMode::AddingCredit,
            Screen::Help => return,
        }
        self.form_focus = 0;
    }

    pub fn cancel_form(&mut self) {
        match self.input_mode {
            InputMode::AddingSale => self.sale_form.clear(),
            InputMode::AddingCredit => self.credit_form.clear(),
            InputMode::Normal => {}
        }
        self.input_mode = InputMode::Normal;
        self.form_focus = 0;
    }

    fn field_count(&self) -> usize {
        match self.input_mode {
            InputMode::AddingSale => SALE_FIELD_COUNT,
            InputMode::AddingCredit => CREDIT_FIELD_COUNT,
            InputMode::Normal => 0,
        }
    }

    pub fn focus_next(&mut self) {
        let count = self.field_count();
        if count > 0 {
            self.form_focus = (self.form_focus + 1) % count;
        }
    }

    pub fn focus_prev(&mut self) {
        let count = self.field_count();
        if count > 0 {
            self.form_focus = (self.form_focus + count - 1) % count;
        }
    }

    fn focused_buffer(&mut self) -> Option<&mut String> {
        match self.input_mode {
            InputMode::AddingSale => match self.form_focus {
                0 => Some(&mut self.sale_form.name),
                1 => Some(&mut self.sale_form.quantity),
                2 => Some(&mut self.sale_form.buy_rate),
                3 => Some(&mut self.sale_form.sell_rate),
                _ => None,
            },
            InputMode::AddingCredit => match self.form_focus {
                0 => Some(&mut self.credit_form.person),
                1 => Some(&mut self.credit_form.item),
                2 => Some(&mut self.credit_form.amount),
                _ => None,
            },
            InputMode::Normal => None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(buf) = self.focused_buffer() {
            buf.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(buf) = self.focused_buffer() {
            buf.pop();
        }
    }

    /// Submit whichever form is open. An invalid entry is a silent no-op
    /// and the form stays open for correction.
    pub fn submit_form(&mut self) {
        match self.input_mode {
            InputMode::AddingSale => {
                if self.sales.add(&self.sale_form).is_some() {
                    tracing::info!("sale recorded");
                    self.sale_form.clear();
                    self.input_mode = InputMode::Normal;
                    self.form_focus = 0;
                    self.persist();
                }
            }
            InputMode::AddingCredit => {
                if self.credits.add(&self.credit_form).is_some() {
                    tracing::info!("udhar recorded");
                    self.credit_form.clear();
                    self.input_mode = InputMode::Normal;
                    self.form_focus = 0;
                    self.persist();
                }
            }
            InputMode::Normal => {}
        }
    }

    /// Delete the selected row on the current screen. The row index is
    /// resolved to the record id first, so a list that shrank between
    /// render and keypress cannot delete a neighbour.
    pub fn delete_selected(&mut self) {
        let removed = match self.current_screen {
            Screen::Sales => {
                let id = self.sales.records().get(self.selected_sale_idx).map(|r| r.id);
                let removed = id.and_then(|id| self.sales.remove_by_id(id)).is_some();
                if self.selected_sale_idx >= self.sales.len() && self.selected_sale_idx > 0 {
                    self.selected_sale_idx -= 1;
                }
                removed
            }
            Screen::Credits => {
                let id = self
                    .credits
                    .records()
                    .get(self.selected_credit_idx)
                    .map(|r| r.id);
                let removed = id.and_then(|id| self.credits.remove_by_id(id)).is_some();
                if self.selected_credit_idx >= self.credits.len() && self.selected_credit_idx > 0
                {
                    self.selected_credit_idx -= 1;
                }
                removed
            }
            Screen::Help => false,
        };
        if removed {
            self.persist();
        }
    }

    /// Rewrite both snapshots. Called after every mutation; a failed save
    /// is logged and shown in the footer instead of crashing the TUI.
    pub fn persist(&mut self) {
        let result = self
            .storage
            .save(SALES_KEY, self.sales.records())
            .and_then(|_| self.storage.save(CREDITS_KEY, self.credits.records()));

        match result {
            Ok(()) => self.save_error = None,
            Err(e) => {
                tracing::warn!("snapshot save failed: {e}");
                self.save_error = Some(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let dir = std::env::temp_dir().join(format!("khata-app-{}", uuid::Uuid::new_v4()));
        App::new(
            SalesLedger::default(),
            CreditLedger::default(),
            Storage::new(dir),
        )
    }

    fn type_into(app: &mut App, text: &str) {
        for c in text.chars() {
            app.push_char(c);
        }
    }

    #[test]
    fn sale_entry_through_form_keys() {
        let mut app = test_app();
        app.open_form();
        assert_eq!(app.input_mode, InputMode::AddingSale);

        type_into(&mut app, "Soap");
        app.focus_next();
        type_into(&mut app, "5");
        app.focus_next();
        type_into(&mut app, "12");
        app.focus_next();
        type_into(&mut app, "20");
        app.submit_form();

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.sales.len(), 1);
        assert_eq!(app.sales.total_sale(), 100.0);
        assert!(app.sale_form.name.is_empty());
    }

    #[test]
    fn invalid_submit_keeps_form_open() {
        let mut app = test_app();
        app.open_form();
        type_into(&mut app, "Soap");
        // quantity left blank
        app.submit_form();

        assert_eq!(app.input_mode, InputMode::AddingSale);
        assert_eq!(app.sale_form.name, "Soap");
        assert!(app.sales.is_empty());
    }

    #[test]
    fn delete_selected_clamps_selection() {
        let mut app = test_app();
        app.current_screen = Screen::Credits;
        app.open_form();
        type_into(&mut app, "Ali");
        app.focus_next();
        type_into(&mut app, "Sugar");
        app.focus_next();
        type_into(&mut app, "50");
        app.submit_form();
        assert_eq!(app.credits.total(), 50.0);

        app.delete_selected();
        assert!(app.credits.is_empty());
        assert_eq!(app.selected_credit_idx, 0);

        // deleting on an empty ledger is a no-op
        app.delete_selected();
        assert!(app.credits.is_empty());
    }

    #[test]
    fn focus_wraps_around_the_form() {
        let mut app = test_app();
        app.open_form();
        app.focus_prev();
        assert_eq!(app.form_focus, SALE_FIELD_COUNT - 1);
        app.focus_next();
        assert_eq!(app.form_focus, 0);
    }
}
