//! Invoice page layout
//!
//! Positions every piece of text of an invoice on A4 pages, in millimetres from the bottom
//! left corner. Nothing here touches the PDF library, so the layout can be inspected directly.

use billable::money::format_in_currency;

use crate::domain::{
    invoices::InvoiceStatement, settings::InvoicePresentation, timesheets::records::TimesheetRecord,
};

pub(crate) const PAGE_WIDTH: f32 = 210.0;
pub(crate) const PAGE_HEIGHT: f32 = 297.0;

pub(crate) const MARGIN: f32 = 20.0;
const RIGHT: f32 = PAGE_WIDTH - MARGIN;
const POINT_MM: f32 = 25.4 / 72.0;
const DESCRIPTION_CHARS: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Weight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Element {
    Text {
        x: f32,
        y: f32,
        size: f32,
        weight: Weight,
        align: Align,
        text: String,
    },
    Rule {
        y: f32,
    },
}

impl Element {
    #[cfg(test)]
    pub(crate) fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            Self::Rule { .. } => None,
        }
    }
}

pub(crate) type Page = Vec<Element>;

/// Estimated width of `text` in millimetres; builtin fonts expose no metrics.
pub(crate) fn estimate_width(text: &str, size: f32) -> f32 {
    let chars = text.chars().count() as f32;

    chars * size * POINT_MM * 0.5
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let mut short: String = text.chars().take(max.saturating_sub(3)).collect();
    short.push_str("...");
    short
}

struct Columns {
    date: f32,
    description: f32,
    hours: f32,
    rate: Option<f32>,
    amount: f32,
}

impl Columns {
    fn new(show_rate: bool) -> Self {
        Self {
            date: MARGIN,
            description: MARGIN + 26.0,
            hours: if show_rate { RIGHT - 62.0 } else { RIGHT - 36.0 },
            rate: show_rate.then_some(RIGHT - 30.0),
            amount: RIGHT,
        }
    }
}

struct Pages {
    pages: Vec<Page>,
    current: Page,
    y: f32,
    size: f32,
}

impl Pages {
    fn new(size: f32) -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
            size,
        }
    }

    fn line_height(&self) -> f32 {
        self.size * POINT_MM * 1.5
    }

    fn push(&mut self, x: f32, weight: Weight, align: Align, text: impl Into<String>) {
        let text = text.into();

        if text.is_empty() {
            return;
        }

        self.current.push(Element::Text {
            x,
            y: self.y,
            size: self.size,
            weight,
            align,
            text,
        });
    }

    fn left(&mut self, x: f32, text: impl Into<String>) {
        self.push(x, Weight::Regular, Align::Left, text);
    }

    fn bold(&mut self, x: f32, text: impl Into<String>) {
        self.push(x, Weight::Bold, Align::Left, text);
    }

    fn right(&mut self, x: f32, text: impl Into<String>) {
        self.push(x, Weight::Regular, Align::Right, text);
    }

    fn right_bold(&mut self, x: f32, text: impl Into<String>) {
        self.push(x, Weight::Bold, Align::Right, text);
    }

    fn rule(&mut self) {
        let y = self.y + self.line_height() * 0.6;

        self.current.push(Element::Rule { y });
    }

    fn advance(&mut self, lines: f32) {
        self.y -= self.line_height() * lines;
    }

    /// Start a new page unless `lines` more lines fit above the bottom margin.
    fn reserve(&mut self, lines: f32) -> bool {
        if self.y - self.line_height() * lines >= MARGIN {
            return false;
        }

        self.pages.push(std::mem::take(&mut self.current));
        self.y = PAGE_HEIGHT - MARGIN;

        true
    }

    fn finish(mut self) -> Vec<Page> {
        self.pages.push(self.current);
        self.pages
    }
}

/// Lay an invoice out over as many pages as it needs.
pub(crate) fn layout_invoice(
    statement: &InvoiceStatement,
    presentation: &InvoicePresentation,
) -> Vec<Page> {
    let size = presentation.pdf_font_size as f32;

    let mut pages = Pages::new(size);

    header(&mut pages, statement, presentation);
    bill_to(&mut pages, statement);

    if statement.invoice.details.display_details {
        itemized(&mut pages, statement, presentation);
    } else {
        summary(&mut pages, statement, presentation);
    }

    totals(&mut pages, statement, presentation);

    if !presentation.invoice_footer.trim().is_empty() {
        pages.reserve(2.0);
        pages.advance(1.0);

        for line in presentation.invoice_footer.lines() {
            pages.left(MARGIN, line);
            pages.advance(1.0);
        }
    }

    pages.finish()
}

fn header(pages: &mut Pages, statement: &InvoiceStatement, presentation: &InvoicePresentation) {
    let invoice = &statement.invoice;

    let top = pages.y;
    let size = pages.size;

    pages.size = size + 8.0;
    pages.bold(MARGIN, presentation.invoice_title.as_str());
    pages.size = size;

    pages.y = top;

    let freelancer = [
        presentation.freelancer_name.as_str(),
        presentation.freelancer_email.as_str(),
        presentation.freelancer_phone.as_str(),
    ]
    .into_iter()
    .chain(presentation.freelancer_address.lines())
    .filter(|line| !line.trim().is_empty());

    for line in freelancer {
        pages.right(RIGHT, line);
        pages.advance(1.0);
    }

    pages.y = pages.y.min(top - pages.line_height() * 2.0);
    pages.advance(1.0);

    pages.bold(MARGIN, format!("Invoice #{}", invoice.id));
    pages.advance(1.0);
    pages.left(MARGIN, format!("Date: {}", invoice.details.invoice_date));
    pages.advance(1.0);

    let status = match invoice.details.date_paid {
        Some(paid) => format!("Status: Paid {paid}"),
        None => "Status: Unpaid".to_string(),
    };

    pages.left(MARGIN, status);
    pages.advance(1.0);

    if !invoice.details.payment_terms.trim().is_empty() {
        pages.left(
            MARGIN,
            format!("Payment terms: {}", invoice.details.payment_terms),
        );
        pages.advance(1.0);
    }

    pages.advance(1.0);
}

fn bill_to(pages: &mut Pages, statement: &InvoiceStatement) {
    let client = &statement.client.details;

    pages.bold(MARGIN, "Bill To");
    pages.advance(1.0);
    pages.left(MARGIN, client.name.as_str());
    pages.advance(1.0);

    if client.address_on_invoice
        && let Some(address) = &client.address
    {
        for line in address.lines().filter(|line| !line.trim().is_empty()) {
            pages.left(MARGIN, line);
            pages.advance(1.0);
        }
    }

    if let Some(email) = client.invoice_cc_email.as_deref().filter(|e| !e.is_empty()) {
        let cc = match client.invoice_cc_description.as_deref() {
            Some(description) if !description.trim().is_empty() => {
                format!("CC: {description} <{email}>")
            }
            _ => format!("CC: {email}"),
        };

        pages.left(MARGIN, cc);
        pages.advance(1.0);
    }

    pages.advance(1.0);
    pages.left(
        MARGIN,
        format!("Project: {}", statement.project.details.name),
    );
    pages.advance(2.0);
}

fn table_header(pages: &mut Pages, columns: &Columns) {
    pages.bold(columns.date, "Date");
    pages.bold(columns.description, "Description");
    pages.right_bold(columns.hours, "Hours");

    if let Some(rate) = columns.rate {
        pages.right_bold(rate, "Rate");
    }

    pages.right_bold(columns.amount, "Amount");
    pages.advance(1.0);
    pages.rule();
}

fn itemized(pages: &mut Pages, statement: &InvoiceStatement, presentation: &InvoicePresentation) {
    let columns = Columns::new(presentation.show_hourly_rate);

    table_header(pages, &columns);

    for timesheet in &statement.timesheets {
        if pages.reserve(1.0) {
            table_header(pages, &columns);
        }

        row(pages, &columns, timesheet, presentation);
    }

    pages.reserve(2.0);
    pages.rule();
    pages.bold(columns.description, "Total hours");
    pages.right_bold(
        columns.hours,
        presentation.hours(statement.totals.total_hours),
    );
    pages.advance(2.0);
}

fn row(
    pages: &mut Pages,
    columns: &Columns,
    timesheet: &TimesheetRecord,
    presentation: &InvoicePresentation,
) {
    let details = &timesheet.details;

    pages.left(columns.date, details.work_date.to_string());
    pages.left(
        columns.description,
        truncate(
            details.description.as_deref().unwrap_or_default(),
            DESCRIPTION_CHARS,
        ),
    );
    pages.right(columns.hours, presentation.hours(details.hours_worked));

    if let Some(rate) = columns.rate {
        pages.right(rate, presentation.money(details.hourly_rate));
    }

    pages.right(columns.amount, presentation.money(timesheet.line_total()));
    pages.advance(1.0);
}

fn summary(pages: &mut Pages, statement: &InvoiceStatement, presentation: &InvoicePresentation) {
    let project = &statement.project.details;
    let totals = &statement.totals;

    pages.left(
        MARGIN,
        truncate(
            &format!("Professional services: {}", project.name),
            DESCRIPTION_CHARS + 20,
        ),
    );

    if !project.flat_fee_invoice && totals.total_hours > 0.0 {
        pages.right(
            RIGHT - 36.0,
            format!("{} hours", presentation.hours(totals.total_hours)),
        );
    }

    pages.right(RIGHT, presentation.money(totals.subtotal));
    pages.advance(2.0);
}

fn totals(pages: &mut Pages, statement: &InvoiceStatement, presentation: &InvoicePresentation) {
    let project = &statement.project.details;
    let totals = &statement.totals;
    let label = RIGHT - 90.0;

    pages.reserve(6.0);
    pages.rule();

    pages.left(label, "Subtotal");
    pages.right(RIGHT, presentation.money(totals.subtotal));
    pages.advance(1.0);

    if totals.discount_amount > 0.0 {
        let percent = project.discount_percent.unwrap_or_default();

        pages.left(
            label,
            with_reason(
                format!("Discount ({percent}%)"),
                project.discount_reason.as_deref(),
            ),
        );
        pages.right(RIGHT, presentation.money(-totals.discount_amount));
        pages.advance(1.0);
    }

    if totals.adjustment_amount != 0.0 {
        pages.left(
            label,
            with_reason(
                "Adjustment".to_string(),
                project.adjustment_reason.as_deref(),
            ),
        );
        pages.right(RIGHT, presentation.money(totals.adjustment_amount));
        pages.advance(1.0);
    }

    pages.bold(label, "Total");
    pages.right_bold(RIGHT, presentation.money(totals.final_total));
    pages.advance(1.0);

    if let Some(converted) = statement.converted_total() {
        let code = project.currency_display.to_ascii_uppercase();
        let amount = format_in_currency(converted, &code)
            .unwrap_or_else(|| format!("{converted:.2} {code}"));

        pages.left(label, format!("Total in {code}"));
        pages.right(RIGHT, amount);
        pages.advance(1.0);
    }
}

fn with_reason(label: String, reason: Option<&str>) -> String {
    match reason.map(str::trim) {
        Some(reason) if !reason.is_empty() => format!("{label}: {}", truncate(reason, 40)),
        _ => label,
    }
}

#[cfg(test)]
mod tests {
    use billable::settings::{SettingValue, SettingsMap};

    use crate::{
        domain::{
            invoices::InvoiceStatement,
            settings::presentation::{defaults, keys},
        },
        test::fixtures::{client_record, invoice_record, project_record, timesheet_record},
    };

    use super::*;

    fn statement(timesheets: usize) -> InvoiceStatement {
        let timesheets: Vec<TimesheetRecord> = (0..timesheets)
            .map(|i| timesheet_record(i64::try_from(i).unwrap_or_default() + 10, 2, 1.5))
            .collect();

        let mut project = project_record(2, 1);
        project.details.discount_percent = Some(12.5);
        project.details.discount_reason = Some("Returning client".to_string());
        project.details.adjustment_amount = Some(75.0);
        project.details.adjustment_reason = Some("Hosting".to_string());

        let invoice = invoice_record(3, 2, 1500.0);

        let totals = billable::totals::compute_totals(
            &billable::totals::BillingTerms {
                amount_due: invoice.details.amount_due,
                hourly_rate: project.details.hourly_rate,
                discount_percent: project.details.discount_percent,
                adjustment_amount: project.details.adjustment_amount,
                flat_fee: project.details.flat_fee_invoice,
            },
            timesheets.iter().map(|t| t.details.hours_worked),
        );

        InvoiceStatement {
            invoice,
            project,
            client: client_record(1),
            timesheets,
            totals,
        }
    }

    fn texts(pages: &[Page]) -> Vec<String> {
        pages
            .iter()
            .flatten()
            .filter_map(Element::text)
            .map(str::to_string)
            .collect()
    }

    fn has(pages: &[Page], needle: &str) -> bool {
        texts(pages).iter().any(|text| text.contains(needle))
    }

    #[test]
    fn totals_block_lists_discount_and_adjustment_with_reasons() {
        let pages = layout_invoice(&statement(2), &InvoicePresentation::default());

        assert_eq!(pages.len(), 1);
        assert!(has(&pages, "Discount (12.5%): Returning client"));
        assert!(has(&pages, "-$187.50"));
        assert!(has(&pages, "Adjustment: Hosting"));
        assert!(has(&pages, "$1,387.50"));
        assert!(!has(&pages, "Total in"));
    }

    #[test]
    fn client_address_only_printed_when_enabled() {
        let mut statement = statement(0);

        let hidden = layout_invoice(&statement, &InvoicePresentation::default());
        assert!(!has(&hidden, "1 Main Street"));

        statement.client.details.address_on_invoice = true;

        let shown = layout_invoice(&statement, &InvoicePresentation::default());
        assert!(has(&shown, "1 Main Street"));
        assert!(has(&shown, "Springfield"));
    }

    #[test]
    fn cc_line_uses_description_when_present() {
        let mut statement = statement(0);
        statement.client.details.invoice_cc_email = Some("ap@example.com".to_string());
        statement.client.details.invoice_cc_description = Some("Accounts".to_string());

        let pages = layout_invoice(&statement, &InvoicePresentation::default());

        assert!(has(&pages, "CC: Accounts <ap@example.com>"));
    }

    #[test]
    fn summary_layout_has_no_timesheet_rows() {
        let mut statement = statement(3);
        statement.invoice.details.display_details = false;

        let pages = layout_invoice(&statement, &InvoicePresentation::default());

        assert!(has(&pages, "Professional services: Rebuild"));
        assert!(has(&pages, "4.50 hours"));
        assert!(!has(&pages, "Description"));
    }

    #[test]
    fn hourly_rate_column_follows_setting() {
        let statement = statement(1);

        let with_rate = layout_invoice(&statement, &InvoicePresentation::default());
        assert!(has(&with_rate, "Rate"));

        let settings = defaults().with(keys::SHOW_HOURLY_RATE, SettingValue::Bool(false));
        let without_rate =
            layout_invoice(&statement, &InvoicePresentation::from_settings(&settings));
        assert!(!has(&without_rate, "Rate"));
    }

    #[test]
    fn converted_total_shown_for_foreign_display_currency() {
        let mut statement = statement(0);
        statement.project.details.currency_display = "EUR".to_string();
        statement.project.details.currency_conversion_rate = 0.5;

        let pages = layout_invoice(&statement, &InvoicePresentation::default());

        assert!(has(&pages, "Total in EUR"));
    }

    #[test]
    fn long_tables_continue_on_new_pages_with_headers() {
        let pages = layout_invoice(&statement(120), &InvoicePresentation::default());

        assert!(pages.len() > 1, "expected several pages, got {}", pages.len());

        for page in &pages {
            let texts: Vec<&str> = page.iter().filter_map(Element::text).collect();

            if texts.contains(&"2026-03-02") {
                assert!(texts.contains(&"Date"), "table page without a header");
            }
        }

        for page in &pages {
            for element in page {
                if let Element::Text { y, .. } = element {
                    assert!(*y >= MARGIN, "text placed below the margin at {y}");
                }
            }
        }
    }

    #[test]
    fn paid_invoices_show_payment_date() {
        let mut statement = statement(0);
        statement.invoice.details.date_paid = Some(jiff::civil::date(2026, 4, 20));

        let settings = SettingsMap::new().with(
            keys::INVOICE_FOOTER,
            SettingValue::String("Thanks!".to_string()),
        );

        let pages = layout_invoice(&statement, &InvoicePresentation::from_settings(&settings));

        assert!(has(&pages, "Status: Paid 2026-04-20"));
        assert!(has(&pages, "Thanks!"));
    }

    #[test]
    fn long_descriptions_are_truncated() {
        let long = "x".repeat(80);
        let short = truncate(&long, DESCRIPTION_CHARS);

        assert_eq!(short.chars().count(), DESCRIPTION_CHARS);
        assert!(short.ends_with("..."));
        assert_eq!(truncate("short", DESCRIPTION_CHARS), "short");
    }
}
