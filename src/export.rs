//! Excel export of the dashboard, one worksheet per report.

use analytics::{DashboardReport, NamedCount, NamedValue};
use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

enum Cell {
    Text(String),
    Amount(Decimal),
    Count(usize),
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<Decimal> for Cell {
    fn from(value: Decimal) -> Self {
        Cell::Amount(value)
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Cell::Count(value)
    }
}

/// Appends tables to a worksheet, leaving a blank row between them.
struct SheetWriter<'a> {
    sheet: &'a mut Worksheet,
    bold: Format,
    amount: Format,
    row: u32,
}

impl<'a> SheetWriter<'a> {
    fn new(workbook: &'a mut Workbook, name: &str) -> Result<Self> {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name)?;
        Ok(Self {
            sheet,
            bold: Format::new().set_bold(),
            amount: Format::new().set_num_format("#,##0.00"),
            row: 0,
        })
    }

    fn table(&mut self, headers: &[&str], rows: Vec<Vec<Cell>>) -> Result<()> {
        for (col, header) in headers.iter().enumerate() {
            self.sheet
                .write_string_with_format(self.row, u16::try_from(col)?, *header, &self.bold)?;
        }
        self.row += 1;

        for cells in rows {
            for (col, cell) in cells.into_iter().enumerate() {
                let col = u16::try_from(col)?;
                match cell {
                    Cell::Text(text) => {
                        self.sheet.write_string(self.row, col, text)?;
                    }
                    Cell::Amount(value) => {
                        self.sheet.write_number_with_format(
                            self.row,
                            col,
                            value.to_f64().unwrap_or_default(),
                            &self.amount,
                        )?;
                    }
                    Cell::Count(value) => {
                        self.sheet
                            .write_number(self.row, col, u32::try_from(value)?)?;
                    }
                }
            }
            self.row += 1;
        }

        self.row += 1;
        Ok(())
    }

    fn named_values(&mut self, title: &str, series: &[NamedValue]) -> Result<()> {
        let rows: Vec<Vec<Cell>> = series
            .iter()
            .map(|entry| vec![entry.name.clone().into(), entry.value.into()])
            .collect();
        self.table(&[title, "Amount"], rows)
    }

    fn named_counts(&mut self, title: &str, series: &[NamedCount]) -> Result<()> {
        let rows: Vec<Vec<Cell>> = series
            .iter()
            .map(|entry| vec![entry.name.clone().into(), entry.value.into()])
            .collect();
        self.table(&[title, "Count"], rows)
    }
}

/// Builds the workbook for `report` in memory.
pub fn workbook(report: &DashboardReport) -> Result<Workbook> {
    let mut workbook = Workbook::new();

    {
        let mut summary = SheetWriter::new(&mut workbook, "Summary")?;
        summary.table(
            &["Metric", "Value"],
            vec![
                vec!["Revenue (paid)".into(), report.sales.revenue.into()],
                vec!["Expenses".into(), report.expenses.total.into()],
                vec!["Net profit".into(), report.profitability.net_profit.into()],
                vec!["Margin %".into(), report.profitability.margin.into()],
                vec!["Orders".into(), report.orders.total_orders.into()],
                vec!["Valid orders".into(), report.orders.valid_orders.into()],
                vec!["Inventory value".into(), report.inventory.total_value.into()],
            ],
        )?;
    }

    {
        let sales = &report.sales;
        let mut sheet = SheetWriter::new(&mut workbook, "Sales")?;
        sheet.named_counts("Channel", &sales.source_data)?;
        sheet.table(
            &["Channel", "Revenue", "Profit"],
            sales
                .profitability_data
                .iter()
                .map(|channel| {
                    vec![
                        channel.name.clone().into(),
                        channel.revenue.into(),
                        channel.profit.into(),
                    ]
                })
                .collect(),
        )?;
    }

    {
        let expenses = &report.expenses;
        let mut sheet = SheetWriter::new(&mut workbook, "Expenses")?;
        sheet.table(
            &["Total", "Share of paid revenue %"],
            vec![vec![expenses.total.into(), expenses.expense_sales_ratio.into()]],
        )?;
        sheet.named_values("Category", &expenses.category_data)?;
        sheet.table(
            &["Item", "Category", "Amount"],
            expenses
                .top_items
                .iter()
                .map(|item| {
                    vec![
                        item.name.clone().into(),
                        item.category.clone().into(),
                        item.value.into(),
                    ]
                })
                .collect(),
        )?;
    }

    {
        let orders = &report.orders;
        let mut sheet = SheetWriter::new(&mut workbook, "Orders")?;
        sheet.table(
            &["Average order value", "Average days to dispatch", "Repeat rate %", "Top district"],
            vec![vec![
                orders.avg_order_value.clone().into(),
                orders.avg_processing_time.clone().into(),
                orders.repeat_rate.into(),
                orders.top_district.clone().into(),
            ]],
        )?;
        sheet.named_counts("Status", &orders.status_data)?;
        sheet.named_counts("District", &orders.district_data)?;
        sheet.table(
            &["Month", "Orders"],
            orders
                .monthly_volume
                .iter()
                .map(|month| vec![month.month.clone().into(), month.orders.into()])
                .collect(),
        )?;
    }

    {
        let profit = &report.profitability;
        let mut sheet = SheetWriter::new(&mut workbook, "Profitability")?;
        sheet.table(
            &["Per valid order", "Revenue", "Cost", "Profit"],
            vec![vec![
                "Average".into(),
                profit.avg_revenue_per_order.into(),
                profit.avg_cost_per_order.into(),
                profit.avg_profit_per_order.into(),
            ]],
        )?;
        sheet.named_values("Share", &profit.pie_data)?;
        sheet.named_values("Channel", &profit.profitability_by_source)?;
    }

    {
        let mut sheet = SheetWriter::new(&mut workbook, "Monthly")?;
        sheet.table(
            &["Month", "Revenue", "Expenses", "Profit"],
            report
                .monthly_financials
                .iter()
                .map(|month| {
                    vec![
                        month.month.clone().into(),
                        month.revenue.into(),
                        month.expenses.into(),
                        month.profit.into(),
                    ]
                })
                .collect(),
        )?;
    }

    {
        let inventory = &report.inventory;
        let mut sheet = SheetWriter::new(&mut workbook, "Inventory")?;
        sheet.named_counts("Status", &inventory.status_data)?;
        sheet.table(
            &["Item", "Category", "In stock", "Reorder at", "Status"],
            inventory
                .low_stock_items
                .iter()
                .map(|item| {
                    vec![
                        item.item_name.clone().into(),
                        item.category.clone().into(),
                        item.current_stock.into(),
                        item.reorder_level.into(),
                        item.status.label().into(),
                    ]
                })
                .collect(),
        )?;
    }

    {
        let mut sheet = SheetWriter::new(&mut workbook, "Top Products")?;
        sheet.table(
            &["Product", "Category", "Quantity", "Revenue"],
            report
                .top_products
                .iter()
                .map(|product| {
                    vec![
                        product.name.clone().into(),
                        product.category.clone().into(),
                        product.quantity.into(),
                        product.revenue.into(),
                    ]
                })
                .collect(),
        )?;
    }

    Ok(workbook)
}

/// Writes the dashboard to an `.xlsx` file at `path`.
pub fn write_workbook(report: &DashboardReport, path: &Path) -> Result<()> {
    let mut workbook = workbook(report)?;
    workbook.save(path)?;
    tracing::info!(path = %path.display(), "Dashboard exported.");
    Ok(())
}
