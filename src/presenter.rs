// Terminal presentation: all user-facing output and prompts live here,
// the pipeline stages stay pure.
use std::io::{self, Write};

use crate::model::{Recommendation, StorageError};
use crate::storage::SqliteStorage;

fn format_summary(rec: &Recommendation) -> String {
    format!(
        "- {}: Change: {:.2}%, Volatility: {:.4}",
        rec.coin, rec.change_percentage, rec.volatility
    )
}

fn format_details(rec: &Recommendation) -> String {
    format!(
        "Coin: {}\n  Change Percentage: {:.2}%\n  Volatility: {:.4}\n  Average Price: ${:.2}\n  Suggestion: {}",
        rec.coin, rec.change_percentage, rec.volatility, rec.average_price, rec.outlook
    )
}

/// Prints the recommendation list and, on request, the detailed view.
pub fn show_recommendations(recommendations: &[Recommendation]) {
    if recommendations.is_empty() {
        println!("No coins are currently recommended for investment based on the trends.");
        return;
    }

    println!("\nThe following coins are recommended for investment:");
    for rec in recommendations {
        println!("{}", format_summary(rec));
    }

    if prompt_yes_no("\nWould you like to view detailed investment recommendations? (yes/no): ") {
        println!("\nDetailed investment recommendations:");
        for rec in recommendations {
            println!("\n{}", format_details(rec));
        }
    } else {
        println!("\nYou chose not to view detailed recommendations.");
    }
}

fn prompt_yes_no(question: &str) -> bool {
    print!("{}", question);
    let _ = io::stdout().flush();

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    answer.trim().eq_ignore_ascii_case("yes")
}

/// Dumps the stored prices and trends, mirroring what was persisted this run.
pub fn show_database(storage: &SqliteStorage) -> Result<(), StorageError> {
    println!("\nPrice Data:");
    for (coin, date, price) in storage.get_price_rows()? {
        println!("{} - {}: ${:.2}", coin, date, price);
    }

    println!("\nTrend Data:");
    for (coin, change, volatility, _average) in storage.get_trend_rows()? {
        println!("{} - Change: {:.2}%, Volatility: {:.4}", coin, change, volatility);
    }

    Ok(())
}
