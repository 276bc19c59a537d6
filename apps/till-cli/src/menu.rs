//! # Store Menu
//!
//! The interactive loop. Generic over its input and output so the whole
//! dialog can be driven from a byte buffer in tests.
//!
//! ```text
//!   ┌────────────── menu ◄──────────────┐
//!   │   1 list   2 total   3 order      │
//!   │                         │         │
//!   │                         ▼         │
//!   │        pick product #, quantity   │
//!   │        validate whole list ──► drop line + reason
//!   │                         │         │
//!   │              empty input│         │
//!   │                         ▼         │
//!   │                  Store::order ────┘
//!   │
//!   └── 4 / empty input ──► Goodbye
//! ```

use std::io::{BufRead, Write};

use tracing::debug;

use till_core::{OrderReceipt, ProductHandle, ShoppingLine, Store, ORDER_SUCCESS};

use crate::config::CliConfig;
use crate::error::CliResult;

const MENU_ENTRIES: &str = "\
1. List all products in store
2. Show total amount in store
3. Make an order
4. Quit

Please choose a number: ";

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    ListProducts,
    ShowTotal,
    MakeOrder,
    Quit,
}

impl Command {
    fn from_number(number: i64) -> Self {
        match number {
            1 => Command::ListProducts,
            2 => Command::ShowTotal,
            3 => Command::MakeOrder,
            _ => Command::Quit,
        }
    }
}

/// The text front end of one store.
pub struct Menu<R, W> {
    store: Store,
    title: String,
    clear_screen: bool,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(store: Store, config: &CliConfig, input: R, output: W) -> Self {
        Menu {
            store,
            title: format!("{} Menu", config.store_name),
            clear_screen: config.clear_screen,
            input,
            output,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Runs until the user quits or the input ends.
    pub fn run(&mut self) -> CliResult<()> {
        self.clear()?;
        loop {
            let prompt = format!(
                "\n   {}\n   {}\n{}",
                self.title,
                "-".repeat(self.title.chars().count()),
                MENU_ENTRIES
            );
            let command = self
                .ask_number(&prompt, 1, Some(4))?
                .map_or(Command::Quit, Command::from_number);

            self.clear()?;
            writeln!(self.output, "   Command output")?;
            writeln!(self.output, "   --------------")?;

            match command {
                Command::ListProducts => self.print_products()?,
                Command::ShowTotal => self.show_total()?,
                Command::MakeOrder => self.make_an_order()?,
                Command::Quit => {
                    write!(self.output, "      Goodbye!\n\n\n")?;
                    self.output.flush()?;
                    return Ok(());
                }
            }
        }
    }

    /// Prompts until a whole number within `lower..=upper` is entered.
    ///
    /// Empty input, or the end of the input, gives `None`.
    fn ask_number(
        &mut self,
        message: &str,
        lower: i64,
        upper: Option<i64>,
    ) -> CliResult<Option<i64>> {
        loop {
            write!(self.output, "{message}")?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self.input.read_line(&mut line)?;
            let text = line.trim();
            if read == 0 || text.is_empty() {
                return Ok(None);
            }

            if let Ok(number) = text.parse::<i64>() {
                if number >= lower && upper.map_or(true, |upper| number <= upper) {
                    return Ok(Some(number));
                }
            }
        }
    }

    fn clear(&mut self) -> CliResult<()> {
        if self.clear_screen {
            write!(self.output, "{CLEAR_SCREEN}")?;
        }
        Ok(())
    }

    fn print_products(&mut self) -> CliResult<()> {
        for (index, product) in self.store.get_all_products().iter().enumerate() {
            writeln!(self.output, "{}. {}", index + 1, product.borrow())?;
        }
        Ok(())
    }

    /// Units in stock across the products a customer can buy. Deactivated
    /// entries are left out, unlike [`Store::get_total_quantity`].
    fn show_total(&mut self) -> CliResult<()> {
        let total = self
            .store
            .get_all_products()
            .iter()
            .filter_map(|product| product.borrow().quantity())
            .fold(0, i64::saturating_add);
        writeln!(self.output, "Total of {total} items in store")?;
        Ok(())
    }

    fn print_order(&mut self, lines: &[ShoppingLine]) -> CliResult<()> {
        for (index, line) in lines.iter().enumerate() {
            let product = line.product.borrow();
            let (name, price) = product.quoted_price(line.quantity)?;
            writeln!(
                self.output,
                "{:>5}. {:5} * {:.<30} {}",
                index + 1,
                line.quantity,
                name,
                price
            )?;
        }
        Ok(())
    }

    fn print_receipt(&mut self, receipt: &OrderReceipt) -> CliResult<()> {
        for (index, line) in receipt.lines.iter().enumerate() {
            writeln!(
                self.output,
                "{:>5}. {:5} * {:.<30} {}",
                index + 1,
                line.quantity,
                line.name,
                line.charged
            )?;
        }
        writeln!(self.output, "\nTotal payment: {}", receipt.total)?;
        Ok(())
    }

    /// Builds a shopping list line by line. Each new line is checked against
    /// the whole list so far and dropped if the store would refuse it.
    fn get_order(&mut self) -> CliResult<Vec<ShoppingLine>> {
        let available: Vec<ProductHandle> = self.store.get_all_products();
        let mut lines: Vec<ShoppingLine> = Vec::new();

        self.clear()?;
        writeln!(self.output, "   Available products")?;
        writeln!(self.output, "   ------------------")?;
        self.print_products()?;

        loop {
            writeln!(
                self.output,
                "\nWhen you want to finish the order, enter empty text.\n"
            )?;

            let upper = i64::try_from(available.len()).unwrap_or(i64::MAX);
            let Some(number) =
                self.ask_number("Which product # do you want to add to the order? ", 1, Some(upper))?
            else {
                break;
            };
            let Some(product) = usize::try_from(number - 1)
                .ok()
                .and_then(|index| available.get(index))
            else {
                continue;
            };

            let in_stock = product.borrow().quantity();
            let Some(quantity) = self.ask_number("What amount do you want? ", 1, in_stock)? else {
                break;
            };

            lines.push(ShoppingLine::new(product, quantity));
            match self.store.validate_shopping_list(&lines) {
                Err(reason) => {
                    lines.pop();
                    writeln!(self.output, "Could not add that to the order because {reason}.")?;
                }
                Ok(()) => {
                    self.clear()?;
                    writeln!(self.output, "   Your order so far")?;
                    writeln!(self.output, "   -----------------")?;
                    self.print_order(&lines)?;
                    writeln!(self.output, "\n   Available products")?;
                    writeln!(self.output, "   ------------------")?;
                    self.print_products()?;
                }
            }
        }

        Ok(lines)
    }

    fn make_an_order(&mut self) -> CliResult<()> {
        let lines = self.get_order()?;
        if lines.is_empty() {
            writeln!(self.output, "Order was empty. Smart move!")?;
            return Ok(());
        }

        writeln!(self.output, "\n********\n")?;
        match self.store.order(&lines) {
            Err(reason) => {
                writeln!(
                    self.output,
                    "Error while making an order. The store did not accept the order because {reason}"
                )?;
            }
            Ok(receipt) => {
                let json = serde_json::to_string(&receipt)?;
                debug!(receipt = %json, "Receipt issued");
                writeln!(self.output, "{ORDER_SUCCESS}\n")?;
                self.print_receipt(&receipt)?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use till_core::catalog::default_catalog;

    fn quiet_config() -> CliConfig {
        CliConfig {
            clear_screen: false,
            ..CliConfig::default()
        }
    }

    /// Runs the menu on the demo store and returns the output and the
    /// units left in stock.
    fn run_session(input: &str, config: &CliConfig) -> (String, i64) {
        run_store_session(default_catalog().unwrap(), input, config)
    }

    fn run_store_session(store: Store, input: &str, config: &CliConfig) -> (String, i64) {
        let mut output = Vec::new();
        let mut menu = Menu::new(
            store,
            config,
            Cursor::new(input.as_bytes().to_vec()),
            &mut output,
        );
        menu.run().unwrap();
        let remaining = menu.store().get_total_quantity();
        drop(menu);
        (String::from_utf8(output).unwrap(), remaining)
    }

    #[test]
    fn test_total_and_quit() {
        let (output, remaining) = run_session("2\n4\n", &quiet_config());
        assert!(output.contains("Best Buy Menu\n   -------------\n1. List all products in store"));
        assert!(output.contains("Total of 950 items in store"));
        assert!(output.ends_with("      Goodbye!\n\n\n"));
        assert_eq!(remaining, 950);
    }

    #[test]
    fn test_total_skips_deactivated_products() {
        let store = default_catalog().unwrap();
        // MacBook Air M2, 100 units
        store.products()[0].borrow_mut().deactivate();

        let (output, remaining) = run_store_session(store, "2\n4\n", &quiet_config());
        assert!(output.contains("Total of 850 items in store"));
        assert_eq!(remaining, 950);
    }

    #[test]
    fn test_huge_quantities() {
        // 30% off keeps 10^17 licenses within range
        let (output, remaining) =
            run_session("3\n4\n100000000000000000\n\n\n", &quiet_config());
        assert!(output.contains("Total payment: $8750000000000000000"));
        assert_eq!(remaining, 950);

        let (output, remaining) =
            run_session("3\n4\n200000000000000000\n\n\n", &quiet_config());
        assert!(output.contains(
            "Could not add that to the order because the price of \
             200000000000000000 pieces of Windows License is too large to charge."
        ));
        assert!(output.contains("Order was empty. Smart move!"));
        assert_eq!(remaining, 950);
    }

    #[test]
    fn test_invalid_choices_are_asked_again() {
        let (output, _) = run_session("abc\n9\n0\n1\n\n", &quiet_config());
        assert_eq!(output.matches("Please choose a number: ").count(), 5);
        assert!(output.contains(
            "1. MacBook Air M2, Price: $1450, Quantity: 100, Promotion: Second Half price!"
        ));
        assert!(output.contains(
            "7. Rare coffee, Price: $100, Quantity: 100, Limited to 1 per order!, Promotion: None"
        ));
    }

    #[test]
    fn test_end_of_input_quits() {
        let (output, _) = run_session("", &quiet_config());
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn test_demo_order() {
        let (output, remaining) = run_session("3\n1\n100\n2\n200\n6\n1\n\n\n", &quiet_config());
        assert!(output.contains("   Your order so far"));
        assert!(output.contains("Order completed successfully."));
        assert!(output.contains("    1.   100 * MacBook Air M2................ $108750"));
        assert!(output.contains("    2.   200 * Bose QuietComfort Earbuds..... $33500"));
        assert!(output.contains("    3.     1 * Shipping...................... $10"));
        assert!(output.contains("Total payment: $142260"));
        assert_eq!(remaining, 650);
    }

    #[test]
    fn test_rejected_line_is_dropped() {
        let (output, remaining) = run_session("3\n6\n2\n\n\n", &quiet_config());
        assert!(output.contains(
            "Could not add that to the order because \
             Shipping is a limited product. Only 1 allowed in one purchase."
        ));
        assert!(output.contains("Order was empty. Smart move!"));
        assert_eq!(remaining, 950);
    }

    #[test]
    fn test_lines_are_checked_together() {
        let (output, remaining) = run_session("3\n1\n60\n1\n60\n\n\n", &quiet_config());
        assert!(output.contains(
            "Could not add that to the order because \
             there are only 100 pieces of MacBook Air M2. Cannot sell 120."
        ));
        assert!(output.contains("    1.    60 * MacBook Air M2"));
        assert_eq!(remaining, 890);
    }

    #[test]
    fn test_quantity_above_stock_is_asked_again() {
        let (output, remaining) = run_session("3\n1\n101\n\n\n", &quiet_config());
        assert_eq!(output.matches("What amount do you want? ").count(), 2);
        assert!(!output.contains("Could not add"));
        assert!(output.contains("Order was empty. Smart move!"));
        assert_eq!(remaining, 950);
    }

    #[test]
    fn test_clear_screen() {
        let (output, _) = run_session("\n", &CliConfig::default());
        assert!(output.starts_with(CLEAR_SCREEN));

        let (output, _) = run_session("\n", &quiet_config());
        assert!(!output.contains(CLEAR_SCREEN));
    }

    #[test]
    fn test_custom_store_name() {
        let config = CliConfig {
            store_name: "Corner Shop".to_string(),
            ..quiet_config()
        };
        let (output, _) = run_session("\n", &config);
        assert!(output.contains("   Corner Shop Menu\n   ----------------\n"));
    }
}
