//! Plain-text rendering of ledger state.

use stockbook_core::{Ledger, NaiveDate, Purchase, Sale};

fn display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Print the one-line summary of the current aggregates.
pub fn print_totals(ledger: &Ledger) {
    println!(
        "Current WAC: {:.2} | Current Stock: {} items",
        ledger.wac, ledger.stock
    );
}

/// Print the purchases table, the sales table, and the summary line.
pub fn print_ledger(ledger: &Ledger) {
    print_purchases(&ledger.purchases);
    println!();
    print_sales(&ledger.sales);
    println!();
    print_totals(ledger);
}

fn print_purchases(purchases: &[Purchase]) {
    println!("Purchases");
    println!("---------");
    if purchases.is_empty() {
        println!("  (none)");
        return;
    }

    let mut rows: Vec<&Purchase> = purchases.iter().collect();
    rows.sort_by_key(|p| p.date);

    println!(
        "{:<12} {:<36} {:>8} {:>12} {:>12} {:>16}",
        "Date", "ID", "Quantity", "Cost/Unit", "Total Cost", "Cumulative WAC"
    );
    for purchase in rows {
        let cumulative = purchase
            .accumulate
            .map_or_else(|| "-".to_string(), |a| format!("{:.2}", a.unit_cost()));
        println!(
            "{:<12} {:<36} {:>8} {:>12.2} {:>12.2} {:>16}",
            display_date(purchase.date),
            purchase.id,
            purchase.quantity,
            purchase.unit_cost(),
            purchase.total_cost,
            cumulative
        );
    }
}

fn print_sales(sales: &[Sale]) {
    println!("Sales");
    println!("-----");
    if sales.is_empty() {
        println!("  (none)");
        return;
    }

    let mut rows: Vec<&Sale> = sales.iter().collect();
    rows.sort_by_key(|s| s.date);

    println!(
        "{:<12} {:<36} {:>8} {:>12} {:>12} {:>12}",
        "Date", "ID", "Quantity", "Price/Unit", "Total Amount", "Total Cost"
    );
    for sale in rows {
        let total_cost = sale
            .total_cost
            .map_or_else(|| "-".to_string(), |c| format!("{c:.2}"));
        println!(
            "{:<12} {:<36} {:>8} {:>12.2} {:>12.2} {:>12}",
            display_date(sale.date),
            sale.id,
            sale.quantity,
            sale.unit_price(),
            sale.total_amount,
            total_cost
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_date_is_day_first() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(display_date(date), "05/01/2024");
    }
}
