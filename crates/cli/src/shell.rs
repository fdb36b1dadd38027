use std::io::{self, BufRead, Write};

use fruitshop_core::ValidationError;
use fruitshop_infra::{Checkout, CheckoutError, InvoiceLog, SessionView};
use fruitshop_inventory::DisplayEntry;
use fruitshop_sales::STANDARD_DISCOUNT;

use crate::command::Command;

/// Whether the read loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

const HELP: &str = "\
commands:
  list                      show items and stock
  name <customer>           set the customer name
  add <item|number> <qty>   add to cart
  show                      show the current invoice
  total                     show the discounted total
  invoice                   save the final invoice
  clear                     empty the cart and restock
  quit                      leave";

/// Interactive till: reads commands line by line, prints views.
pub struct Shell<L> {
    checkout: Checkout<L>,
    customer_name: String,
    log_target: String,
}

impl<L> Shell<L>
where
    L: InvoiceLog,
{
    pub fn new(checkout: Checkout<L>, log_target: impl Into<String>) -> Self {
        Self {
            checkout,
            customer_name: String::new(),
            log_target: log_target.into(),
        }
    }

    pub fn checkout(&self) -> &Checkout<L> {
        &self.checkout
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Run until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> io::Result<()> {
        writeln!(out, "Fruit Shop 💸  (type `help` for commands)")?;
        self.print_entries(&mut out, &self.checkout.view().entries)?;
        write!(out, "> ")?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                match line.parse::<Command>() {
                    Ok(command) => {
                        if self.execute(command, &mut out)? == Flow::Quit {
                            return Ok(());
                        }
                    }
                    Err(err) => writeln!(out, "{err}")?,
                }
            }
            write!(out, "> ")?;
            out.flush()?;
        }

        writeln!(out)?;
        Ok(())
    }

    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<Flow> {
        match command {
            Command::List => {
                let view = self.checkout.view();
                self.print_entries(out, &view.entries)?;
            }
            Command::Name(name) => {
                self.customer_name = name.trim().to_string();
                writeln!(out, "Customer: {}", self.customer_name)?;
            }
            Command::Add { item, quantity } => {
                let item = self.resolve_item(&item);
                match self.checkout.add_to_cart(&item, &quantity, &self.customer_name) {
                    Ok(view) => self.print_view(out, &view)?,
                    Err(err) => writeln!(out, "{}", describe(&err))?,
                }
            }
            Command::Show => {
                write!(out, "{}", self.checkout.render_invoice(&self.customer_name, false))?;
            }
            Command::Total => {
                writeln!(
                    out,
                    "Total ({}% off): ₹{}",
                    STANDARD_DISCOUNT.rate(),
                    self.checkout.view().running_total
                )?;
            }
            Command::Invoice => match self.checkout.finalize(&self.customer_name) {
                Ok(text) => {
                    writeln!(out, "{text}")?;
                    writeln!(out, "Invoice saved to {} 📄", self.log_target)?;
                }
                Err(err) => writeln!(out, "{}", describe(&err))?,
            },
            Command::Clear => match self.checkout.clear() {
                Ok(view) => {
                    writeln!(out, "Cart cleared.")?;
                    writeln!(out, "Total: ₹0.00")?;
                    self.print_entries(out, &view.entries)?;
                }
                Err(err) => writeln!(out, "{}", describe(&err))?,
            },
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Map a list number or a case-insensitive name onto the item's name.
    /// Anything else is passed through unchanged.
    fn resolve_item(&self, choice: &str) -> String {
        let entries = self.checkout.session().inventory().list_display_entries();

        if let Ok(position) = choice.parse::<usize>() {
            if let Some(entry) = position.checked_sub(1).and_then(|i| entries.get(i)) {
                return entry.name.clone();
            }
        }

        entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(choice))
            .map_or_else(|| choice.to_string(), |entry| entry.name.clone())
    }

    fn print_entries<W: Write>(&self, out: &mut W, entries: &[DisplayEntry]) -> io::Result<()> {
        for (i, entry) in entries.iter().enumerate() {
            writeln!(out, "{:>2}. {entry}", i + 1)?;
        }
        Ok(())
    }

    fn print_view<W: Write>(&self, out: &mut W, view: &SessionView) -> io::Result<()> {
        write!(out, "{}", view.invoice_preview)?;
        writeln!(
            out,
            "Total ({}% off): ₹{}",
            STANDARD_DISCOUNT.rate(),
            view.running_total
        )
    }
}

/// Operator-facing message for a rejected operation.
fn describe(err: &CheckoutError) -> String {
    match err.validation() {
        Some(ValidationError::EmptyQuantity) => "Enter quantity.".to_string(),
        Some(ValidationError::NotANumber(_)) => "Invalid quantity.".to_string(),
        Some(ValidationError::NonPositive(_)) => "Quantity must be positive.".to_string(),
        Some(ValidationError::InsufficientStock { available, .. }) => {
            format!("Not enough stock! Only {available} left.")
        }
        Some(ValidationError::UnknownItem(item)) => format!("No such item: {item}."),
        Some(ValidationError::MissingName) => "Please enter customer name.".to_string(),
        Some(ValidationError::EmptyCart) => "Cart is empty!".to_string(),
        None => match err {
            CheckoutError::Log(_) => "Failed to write invoice.".to_string(),
            CheckoutError::Domain(other) => other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use fruitshop_infra::InMemoryInvoiceLog;
    use fruitshop_sales::Session;

    fn shell() -> Shell<InMemoryInvoiceLog> {
        Shell::new(Checkout::new(Session::default(), InMemoryInvoiceLog::new()), "sales.txt")
    }

    fn run(shell: &mut Shell<InMemoryInvoiceLog>, script: &str) -> String {
        let mut out = Vec::new();
        shell.run(Cursor::new(script.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn scripted_sale_saves_an_invoice() {
        let mut shell = shell();
        let out = run(&mut shell, "name Asha\nadd apple 3\ninvoice\nquit\n");

        assert!(out.contains(" 1. 🍎 Apple (Stock: 10 KG)"));
        assert!(out.contains("Apple x 3 KG = ₹150.00"));
        assert!(out.contains("Total (10% off): ₹135.00"));
        assert!(out.contains("Total: ₹135.00"));
        assert!(out.contains("Invoice saved to sales.txt 📄"));
        assert_eq!(shell.checkout().log().entries().len(), 1);
    }

    #[test]
    fn items_can_be_chosen_by_number() {
        let mut shell = shell();
        run(&mut shell, "add 2 5\n");
        assert_eq!(shell.checkout().session().cart().quantity("Banana"), 5);
    }

    #[test]
    fn rejections_are_reported_and_the_loop_continues() {
        let mut shell = shell();
        let out = run(&mut shell, "add 1 abc\nadd 1 0\nadd 1 99\ninvoice\nname Asha\ninvoice\nsell\n");

        assert!(out.contains("Invalid quantity."));
        assert!(out.contains("Quantity must be positive."));
        assert!(out.contains("Not enough stock! Only 10 left."));
        assert!(out.contains("Please enter customer name."));
        assert!(out.contains("Cart is empty!"));
        assert!(out.contains("unknown command"));
        assert!(shell.checkout().log().entries().is_empty());
    }

    #[test]
    fn clear_restocks_and_resets_total() {
        let mut shell = shell();
        let out = run(&mut shell, "add Mango 8\nclear\n");
        assert!(out.contains("Cart cleared."));
        assert!(out.contains(" 4. 🥭 Mango (Stock: 8 KG)"));
        assert!(shell.checkout().session().cart().is_empty());
    }

    #[test]
    fn unknown_names_pass_through_to_validation() {
        let mut shell = shell();
        let out = run(&mut shell, "add Durian 1\nadd 9 1\n");
        assert!(out.contains("No such item: Durian."));
        assert!(out.contains("No such item: 9."));
    }

    #[test]
    fn show_and_add_preview_share_one_customer_header() {
        let mut shell = shell();
        let mut out = Vec::new();
        shell.execute(Command::Name("  Asha  ".into()), &mut out).unwrap();
        shell
            .execute(Command::Add { item: "Apple".into(), quantity: "1".into() }, &mut out)
            .unwrap();
        shell.execute(Command::Show, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("Customer: Asha\n").count(), 3);
        assert!(!out.contains("Customer:   Asha"));
    }

    #[test]
    fn failed_write_is_reported() {
        let mut shell = shell();
        shell.checkout().log().set_offline(true);
        let out = run(&mut shell, "name Asha\nadd 1 1\ninvoice\n");
        assert!(out.contains("Failed to write invoice."));
    }
}
