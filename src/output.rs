use crate::cli::OutputFormat;
use estate_portal::models::{
    Apartment, Bank, Developer, MortgageEstimate, Page, Promotion, Property, User,
};
use serde::Serialize;

/// Plain-text rendering of a model for terminal output
pub trait Describe {
    /// First line, shown after the list index
    fn headline(&self) -> String;

    /// Indented detail lines
    fn details(&self) -> Vec<String>;
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_item<T: Serialize + Describe>(item: &T, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(item),
        OutputFormat::Text => {
            print!("{}", render_item(item));
            Ok(())
        }
    }
}

pub fn print_list<T: Serialize + Describe>(
    items: &[T],
    total: usize,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(items),
        OutputFormat::Text => {
            print!("{}", render_list(items, total));
            Ok(())
        }
    }
}

pub fn print_page<T: Serialize + Describe>(page: &Page<T>, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(page),
        OutputFormat::Text => {
            print!("{}", render_list(&page.items, page.total));
            Ok(())
        }
    }
}

/// Confirmation for calls without a meaningful payload
pub fn print_done<T: Serialize>(message: &str, payload: &T, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(payload),
        OutputFormat::Text => {
            println!("✅ {}", message);
            Ok(())
        }
    }
}

fn render_item<T: Describe>(item: &T) -> String {
    let mut out = format!("{}\n", item.headline());
    for line in item.details() {
        out.push_str(&format!("   {}\n", line));
    }
    out
}

fn render_list<T: Describe>(items: &[T], total: usize) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, item.headline()));
        for line in item.details() {
            out.push_str(&format!("   {}\n", line));
        }
        out.push('\n');
    }
    if total > items.len() {
        out.push_str(&format!("Showing {} of {}\n", items.len(), total));
    } else {
        out.push_str(&format!("{} found\n", items.len()));
    }
    out
}

fn opt(label: &str, value: Option<impl std::fmt::Display>) -> Option<String> {
    value.map(|v| format!("{}: {}", label, v))
}

impl Describe for Property {
    fn headline(&self) -> String {
        format!("{} ({})", self.title, self.price_label())
    }

    fn details(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.rooms.is_empty() {
            let rooms = self.rooms.iter().map(u32::to_string).collect::<Vec<_>>().join("/");
            lines.push(format!("{} rooms, {} m²", rooms, self.area_label()));
        }
        let place = [&self.location.city, &self.location.district, &self.location.address]
            .iter()
            .filter_map(|part| part.as_deref())
            .collect::<Vec<_>>()
            .join(", ");
        if !place.is_empty() {
            lines.push(format!("Location: {}", place));
        }
        lines.extend(opt("Developer", self.developer.as_ref().map(|d| &d.name)));
        lines.extend(opt("Completion", self.completion_date.as_ref()));
        lines.extend(opt("Status", self.status.map(|s| format!("{:?}", s).to_lowercase())));
        if !self.features.is_empty() {
            lines.push(format!("Features: {}", self.features.join(", ")));
        }
        lines.push(format!("ID: {}", self.id));
        lines
    }
}

impl Describe for Apartment {
    fn headline(&self) -> String {
        let number = self.number.as_deref().unwrap_or(&self.id);
        match self.price {
            Some(price) => format!("Apartment {} ({})", number, price),
            None => format!("Apartment {}", number),
        }
    }

    fn details(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.extend(opt("Rooms", self.rooms));
        lines.extend(opt("Area, m²", self.area));
        lines.extend(opt("Floor", self.floor));
        lines.extend(opt("Status", self.status.as_ref()));
        lines.push(format!("ID: {}", self.id));
        lines
    }
}

impl Describe for Developer {
    fn headline(&self) -> String {
        self.name.clone()
    }

    fn details(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.extend(opt("Founded", self.founded_year));
        lines.extend(opt("Projects", self.projects_count.or_else(|| {
            (!self.properties.is_empty()).then_some(self.properties.len() as u32)
        })));
        lines.extend(opt("Website", self.website.as_ref()));
        lines.extend(opt("Phone", self.phone.as_ref()));
        for property in &self.properties {
            lines.push(format!("- {} ({})", property.title, property.id));
        }
        lines.push(format!("ID: {}", self.id));
        lines
    }
}

impl Describe for Promotion {
    fn headline(&self) -> String {
        match self.discount {
            Some(discount) => format!("{} (-{}%)", self.title, discount),
            None => self.title.clone(),
        }
    }

    fn details(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let window = match (self.starts_at, self.ends_at) {
            (Some(start), Some(end)) => Some(format!("{} – {}", start.date_naive(), end.date_naive())),
            (Some(start), None) => Some(format!("from {}", start.date_naive())),
            (None, Some(end)) => Some(format!("until {}", end.date_naive())),
            (None, None) => None,
        };
        lines.extend(opt("Valid", window));
        lines.extend(opt("Developer", self.developer.as_ref().map(|d| &d.name)));
        lines.extend(opt("Property", self.property.as_ref().map(|p| &p.title)));
        lines.push(format!("ID: {}", self.id));
        lines
    }
}

impl Describe for User {
    fn headline(&self) -> String {
        format!("{} <{}>", self.display_name(), self.email)
    }

    fn details(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(format!("Role: {}", format!("{:?}", self.role).to_lowercase()));
        lines.extend(opt("Phone", self.phone.as_ref()));
        lines.extend(opt("Since", self.created_at.map(|t| t.date_naive())));
        lines.push(format!("ID: {}", self.id));
        lines
    }
}

impl Describe for Bank {
    fn headline(&self) -> String {
        self.name.clone()
    }

    fn details(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.extend(opt("Rate from, %", self.min_rate));
        lines.extend(opt("Max term, years", self.max_term_years));
        lines.extend(opt("Min down payment, %", self.min_down_payment_percent));
        lines.push(format!("ID: {}", self.id));
        lines
    }
}

impl Describe for MortgageEstimate {
    fn headline(&self) -> String {
        format!("Monthly payment: {:.2}", self.monthly_payment)
    }

    fn details(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.extend(opt("Loan", self.loan_amount.map(|v| format!("{:.2}", v))));
        lines.extend(opt("Total", self.total_payment.map(|v| format!("{:.2}", v))));
        lines.extend(opt("Overpayment", self.overpayment.map(|v| format!("{:.2}", v))));
        lines.extend(opt("Rate, %", self.interest_rate));
        lines
    }
}
